#![allow(dead_code)]

pub mod championship_helpers;
pub mod utils;
