//! Shared types for the league statistics workspace.
//!
//! Row types for the eight source tables, the error taxonomy, date and
//! form parsing, session selections and CLI settings.

pub mod dates;
pub mod error;
pub mod form;
pub mod models;
pub mod selection;
pub mod settings;

pub use error::{DataError, LeagueError, LoadError, ResolutionError, Result};
pub use models::TableName;
