//! Fixture results and the standings tables derived from them.
//!
//! Every operation here is a free function over the store traits in
//! [`crate::db::store`]; nothing keeps state between calls and every table is
//! recomputed from the stored fixture results.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod score;
pub mod standings;
pub mod tables;
pub mod update;

pub use error::ChampionshipError;
