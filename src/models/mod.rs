pub mod championship;
pub mod common;
