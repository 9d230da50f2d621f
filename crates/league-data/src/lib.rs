//! Data layer for league statistics.
//!
//! Loads the eight CSV tables into an immutable bundle, resolves teams and
//! players across tables, filters fixtures and derives aggregate figures.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod resolver;
pub mod store;

pub use league_core as core;
pub use store::{DatasetBundle, DatasetStore};
