use std::path::PathBuf;
use thiserror::Error;

use crate::models::TableName;

/// A required source table could not be turned into typed rows.
///
/// Fatal to startup: no partial bundle is ever produced.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file does not exist in the data directory.
    #[error("{table} source not found at {path}")]
    MissingSource { table: TableName, path: PathBuf },

    /// The source file exists but could not be opened or read.
    #[error("Failed to read {table} source {path}: {source}")]
    Read {
        table: TableName,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks a column the table requires.
    #[error("{table} source is missing required column '{column}'")]
    MissingColumn { table: TableName, column: String },

    /// A data row could not be parsed into the table's row type.
    #[error("Malformed row {row} in {table}: {message}")]
    MalformedRow {
        table: TableName,
        /// 1-based line number in the source file (header is line 1).
        row: u64,
        message: String,
    },
}

/// An entity name did not map to exactly one row where one was expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No row's key column equals the entity name.
    #[error("'{entity}' not found in {table} (key column '{key_column}')")]
    NotFound {
        table: TableName,
        key_column: &'static str,
        entity: String,
    },

    /// Several rows carry the name where exactly one is expected.
    #[error("'{entity}' matches {count} rows in {table} (key column '{key_column}'), expected one")]
    Ambiguous {
        table: TableName,
        key_column: &'static str,
        entity: String,
        count: usize,
    },
}

impl ResolutionError {
    /// The table whose lookup failed.
    pub fn table(&self) -> TableName {
        match self {
            ResolutionError::NotFound { table, .. } | ResolutionError::Ambiguous { table, .. } => {
                *table
            }
        }
    }
}

/// Which side of a fixture a score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSide {
    Home,
    Away,
}

impl std::fmt::Display for ScoreSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreSide::Home => f.write_str("HomeScore"),
            ScoreSide::Away => f.write_str("AwayScore"),
        }
    }
}

/// A resolved row lacks data an aggregation needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A fixture being tallied has no score on one side.
    #[error("Fixture {home} vs {away} on {date} has no {side}")]
    MissingScore {
        home: String,
        away: String,
        date: chrono::NaiveDate,
        side: ScoreSide,
    },
}

/// All errors produced by the league statistics crates.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// A date string supplied as a selection bound did not parse.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the league crates.
pub type Result<T> = std::result::Result<T, LeagueError>;
