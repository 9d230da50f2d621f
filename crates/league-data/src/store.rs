//! CSV loading for the eight league tables.
//!
//! [`DatasetStore::load`] reads every source in the data directory and
//! returns an immutable [`DatasetBundle`]. Any failure aborts the whole load;
//! no partial bundle is ever returned.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use league_core::error::LoadError;
use league_core::models::{
    Fixture, PlayerPossession, PlayerSalary, PlayerStats, Row, Standing, TableName,
    TeamPossession, TeamSalary, TeamStats,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

// ── Tables ────────────────────────────────────────────────────────────────────

/// Mutable assembly area for the eight tables before they are frozen into a
/// [`DatasetBundle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub standings: Vec<Standing>,
    pub fixtures: Vec<Fixture>,
    pub team_stats: Vec<TeamStats>,
    pub team_possession: Vec<TeamPossession>,
    pub team_salary: Vec<TeamSalary>,
    pub player_stats: Vec<PlayerStats>,
    pub player_possession: Vec<PlayerPossession>,
    pub player_salaries: Vec<PlayerSalary>,
}

// ── DatasetBundle ─────────────────────────────────────────────────────────────

/// The complete, read-only set of source tables for one session.
///
/// Rows keep the order of their source file. There is no way to mutate a
/// bundle once built; share it behind an `Arc` between sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBundle {
    tables: Tables,
}

impl DatasetBundle {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    pub fn standings(&self) -> &[Standing] {
        &self.tables.standings
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.tables.fixtures
    }

    pub fn team_stats(&self) -> &[TeamStats] {
        &self.tables.team_stats
    }

    pub fn team_possession(&self) -> &[TeamPossession] {
        &self.tables.team_possession
    }

    pub fn team_salary(&self) -> &[TeamSalary] {
        &self.tables.team_salary
    }

    pub fn player_stats(&self) -> &[PlayerStats] {
        &self.tables.player_stats
    }

    pub fn player_possession(&self) -> &[PlayerPossession] {
        &self.tables.player_possession
    }

    pub fn player_salaries(&self) -> &[PlayerSalary] {
        &self.tables.player_salaries
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::Standings => self.tables.standings.len(),
            TableName::Fixtures => self.tables.fixtures.len(),
            TableName::TeamStats => self.tables.team_stats.len(),
            TableName::TeamPossession => self.tables.team_possession.len(),
            TableName::TeamSalary => self.tables.team_salary.len(),
            TableName::PlayerStats => self.tables.player_stats.len(),
            TableName::PlayerPossession => self.tables.player_possession.len(),
            TableName::PlayerSalaries => self.tables.player_salaries.len(),
        }
    }

    /// Row counts keyed by logical table name.
    pub fn row_counts(&self) -> BTreeMap<TableName, usize> {
        TableName::ALL
            .iter()
            .map(|&table| (table, self.row_count(table)))
            .collect()
    }
}

// ── DatasetStore ──────────────────────────────────────────────────────────────

/// Reads the league tables from one data directory.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of `table`'s source file inside the data directory.
    pub fn source_path(&self, table: TableName) -> PathBuf {
        self.data_dir.join(table.file_name())
    }

    /// Read all eight sources into a bundle.
    ///
    /// Fails on the first source that is missing, unreadable, lacks a
    /// required column or holds a row that does not parse.
    pub fn load(&self) -> Result<DatasetBundle, LoadError> {
        let started = std::time::Instant::now();

        let tables = Tables {
            standings: self.read_table()?,
            fixtures: self.read_table()?,
            team_stats: self.read_table()?,
            team_possession: self.read_table()?,
            team_salary: self.read_table()?,
            player_stats: self.read_table()?,
            player_possession: self.read_table()?,
            player_salaries: self.read_table()?,
        };
        let bundle = DatasetBundle::new(tables);

        info!(
            data_dir = %self.data_dir.display(),
            fixtures = bundle.fixtures().len(),
            players = bundle.player_stats().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );

        Ok(bundle)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Read one table, checking its header before deserializing any row.
    fn read_table<R>(&self) -> Result<Vec<R>, LoadError>
    where
        R: Row + DeserializeOwned,
    {
        let table = R::TABLE;
        let path = self.source_path(table);

        if !path.exists() {
            return Err(LoadError::MissingSource { table, path });
        }

        let file = File::open(&path).map_err(|source| LoadError::Read {
            table,
            path: path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(table, &path, e))?
            .clone();
        check_required_columns(table, &headers)?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<R>() {
            rows.push(result.map_err(|e| csv_error(table, &path, e))?);
        }

        debug!("{}: {} rows from {}", table, rows.len(), path.display());
        Ok(rows)
    }
}

/// Every required column must be present under one of its accepted spellings.
fn check_required_columns(table: TableName, headers: &csv::StringRecord) -> Result<(), LoadError> {
    for spellings in table.required_columns() {
        let present = spellings
            .iter()
            .any(|name| headers.iter().any(|h| h == *name));
        if !present {
            return Err(LoadError::MissingColumn {
                table,
                column: spellings[0].to_string(),
            });
        }
    }
    Ok(())
}

/// Map a `csv` error to the matching [`LoadError`], keeping the line number.
fn csv_error(table: TableName, path: &Path, err: csv::Error) -> LoadError {
    let row = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Read {
            table,
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::MalformedRow {
            table,
            row,
            message,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
