//! Runtime layer for league statistics.
//!
//! Holds the load-once shared bundle and runs per-session selections
//! against it.

pub mod bundle_cache;
pub mod session;

pub use league_core as core;
pub use league_data as data;
