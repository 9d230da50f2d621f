//! Entity resolution across tables with differently named key columns.
//!
//! The same team or player is keyed by `team`, `name`, `player` or `Player`
//! depending on the source file. Which column identifies the entity in which
//! table is declared once in [`KEY_COLUMNS`]; lookups go through that map
//! and compare names exactly (case-sensitive, no fuzzy matching).

use league_core::error::ResolutionError;
use league_core::models::{
    PlayerPossession, PlayerSalary, PlayerStats, Row, Standing, TableName, TeamPossession,
    TeamSalary, TeamStats,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::store::DatasetBundle;

/// Entity key columns per table. A row belongs to an entity when any of its
/// table's key columns holds the name; only fixtures have more than one.
pub const KEY_COLUMNS: [(TableName, &[&str]); 8] = [
    (TableName::Standings, &["team"]),
    (TableName::Fixtures, &["Home", "Away"]),
    (TableName::TeamStats, &["team"]),
    (TableName::TeamPossession, &["team"]),
    (TableName::TeamSalary, &["team"]),
    (TableName::PlayerStats, &["name"]),
    (TableName::PlayerPossession, &["player"]),
    (TableName::PlayerSalaries, &["Player"]),
];

/// Key columns for `table`.
pub fn key_columns(table: TableName) -> &'static [&'static str] {
    KEY_COLUMNS
        .iter()
        .find(|(t, _)| *t == table)
        .map(|(_, columns)| *columns)
        .unwrap_or(&["team"])
}

/// Primary key column for `table`, as named in resolution errors.
pub fn key_column(table: TableName) -> &'static str {
    key_columns(table).first().copied().unwrap_or("team")
}

/// Whether `row` is keyed by `entity` in any of its table's key columns.
pub fn is_keyed_by<R: Row>(row: &R, entity: &str) -> bool {
    key_columns(R::TABLE)
        .iter()
        .any(|column| row.text(column) == Some(entity))
}

// ── Resolved records ──────────────────────────────────────────────────────────

/// Every row belonging to one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord<'a> {
    pub standing: &'a Standing,
    pub team_stats: &'a TeamStats,
    /// `None` when the possession table has no row for the team.
    pub team_possession: Option<&'a TeamPossession>,
    /// All payroll rows for the team in source order; may be empty.
    pub team_salary_rows: Vec<&'a TeamSalary>,
}

/// The one row per player table belonging to one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord<'a> {
    pub stats: &'a PlayerStats,
    pub possession: &'a PlayerPossession,
    pub salary: &'a PlayerSalary,
}

// ── EntityResolver ────────────────────────────────────────────────────────────

/// Stateless lookups of teams and players in a [`DatasetBundle`].
pub struct EntityResolver;

impl EntityResolver {
    /// Resolve `team` in every team-keyed table.
    ///
    /// Standings and team stats must hold exactly one row for the team.
    /// A missing possession row or an empty payroll is reported as absence,
    /// not as an error.
    pub fn resolve_team<'a>(
        bundle: &'a DatasetBundle,
        team: &str,
    ) -> Result<TeamRecord<'a>, ResolutionError> {
        let standing = exactly_one(bundle.standings(), team)?;
        let team_stats = exactly_one(bundle.team_stats(), team)?;
        let team_possession = first_or_none(bundle.team_possession(), team);
        let team_salary_rows = matching_rows(bundle.team_salary(), team);

        if team_possession.is_none() {
            warn!("no {} row for team \"{}\"", TableName::TeamPossession, team);
        }
        debug!(
            team,
            salary_rows = team_salary_rows.len(),
            "team resolved"
        );

        Ok(TeamRecord {
            standing,
            team_stats,
            team_possession,
            team_salary_rows,
        })
    }

    /// Resolve `name` in the three player-keyed tables.
    ///
    /// Each table must hold exactly one row; the error names the first table
    /// that does not.
    pub fn resolve_player<'a>(
        bundle: &'a DatasetBundle,
        name: &str,
    ) -> Result<PlayerRecord<'a>, ResolutionError> {
        let stats = exactly_one(bundle.player_stats(), name)?;
        let possession = exactly_one(bundle.player_possession(), name)?;
        let salary = exactly_one(bundle.player_salaries(), name)?;

        debug!(player = name, team = %stats.team, "player resolved");

        Ok(PlayerRecord {
            stats,
            possession,
            salary,
        })
    }
}

// ── Lookup primitives ─────────────────────────────────────────────────────────

/// All rows of `R`'s table keyed by `entity`, in source order.
pub fn matching_rows<'a, R: Row>(rows: &'a [R], entity: &str) -> Vec<&'a R> {
    rows.iter().filter(|row| is_keyed_by(*row, entity)).collect()
}

/// The single row keyed by `entity`.
pub fn exactly_one<'a, R: Row>(rows: &'a [R], entity: &str) -> Result<&'a R, ResolutionError> {
    let mut matches = matching_rows(rows, entity);
    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(ResolutionError::NotFound {
            table: R::TABLE,
            key_column: key_column(R::TABLE),
            entity: entity.to_string(),
        }),
        count => Err(ResolutionError::Ambiguous {
            table: R::TABLE,
            key_column: key_column(R::TABLE),
            entity: entity.to_string(),
            count,
        }),
    }
}

/// First row keyed by `entity`, if any. Duplicates are logged and ignored.
fn first_or_none<'a, R: Row>(rows: &'a [R], entity: &str) -> Option<&'a R> {
    let matches = matching_rows(rows, entity);
    if matches.len() > 1 {
        warn!(
            "{} rows for \"{}\" in {}; using the first",
            matches.len(),
            entity,
            R::TABLE
        );
    }
    matches.into_iter().next()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_bundle;
    use crate::store::Tables;

    fn standing(team: &str, rank: u32) -> Standing {
        Standing {
            team: team.to_string(),
            rank,
            points: 10,
            last5: "WWWWW".to_string(),
        }
    }

    fn team_stats(team: &str) -> TeamStats {
        TeamStats {
            team: team.to_string(),
            goals: 1,
            expected_goals: 1.0,
            possession: 50.0,
            progressive_passes: 1,
            yellows: 0,
            reds: 0,
        }
    }

    // ── key map ───────────────────────────────────────────────────────────────

    #[test]
    fn test_key_map_covers_every_table() {
        for table in TableName::ALL {
            assert!(KEY_COLUMNS.iter().any(|(t, _)| *t == table), "{table} has no key column");
        }
        assert_eq!(key_column(TableName::PlayerStats), "name");
        assert_eq!(key_column(TableName::PlayerPossession), "player");
        assert_eq!(key_column(TableName::PlayerSalaries), "Player");
        assert_eq!(key_columns(TableName::Fixtures), &["Home", "Away"]);
    }

    #[test]
    fn test_fixtures_keyed_by_home_and_away() {
        let bundle = sample_bundle();
        let chelsea = matching_rows(bundle.fixtures(), "Chelsea");
        let pairs: Vec<(&str, &str)> = chelsea
            .iter()
            .map(|f| (f.home.as_str(), f.away.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Chelsea", "Arsenal"),
                ("Arsenal", "Chelsea"),
                ("Fulham", "Chelsea")
            ]
        );
        assert!(!is_keyed_by(&bundle.fixtures()[0], "chelsea"));
    }

    // ── resolve_team ──────────────────────────────────────────────────────────

    #[test]
    fn test_every_standing_team_resolves() {
        let bundle = sample_bundle();
        for row in bundle.standings() {
            let record = EntityResolver::resolve_team(&bundle, &row.team).unwrap();
            assert_eq!(record.standing.team, row.team);
            assert_eq!(record.team_stats.team, row.team);
        }
    }

    #[test]
    fn test_resolve_team_collects_all_salary_rows() {
        let bundle = sample_bundle();
        let record = EntityResolver::resolve_team(&bundle, "Arsenal").unwrap();

        let resolved: u64 = record.team_salary_rows.iter().map(|r| r.weekly).sum();
        let direct: u64 = bundle
            .team_salary()
            .iter()
            .filter(|r| r.team == "Arsenal")
            .map(|r| r.weekly)
            .sum();
        assert_eq!(resolved, direct);
        assert_eq!(record.team_salary_rows.len(), 2);
    }

    #[test]
    fn test_resolve_team_quiet_absence() {
        let bundle = sample_bundle();
        // Fulham has no possession row and no payroll rows.
        let record = EntityResolver::resolve_team(&bundle, "Fulham").unwrap();
        assert!(record.team_possession.is_none());
        assert!(record.team_salary_rows.is_empty());
    }

    #[test]
    fn test_resolve_team_is_case_sensitive() {
        let bundle = sample_bundle();
        let err = EntityResolver::resolve_team(&bundle, "arsenal").unwrap_err();
        assert_eq!(err.table(), TableName::Standings);
    }

    #[test]
    fn test_resolve_team_missing_stats() {
        let bundle = DatasetBundle::new(Tables {
            standings: vec![standing("Man Utd", 8)],
            team_stats: vec![team_stats("Manchester United")],
            ..Tables::default()
        });

        let err = EntityResolver::resolve_team(&bundle, "Man Utd").unwrap_err();
        assert_eq!(
            err,
            ResolutionError::NotFound {
                table: TableName::TeamStats,
                key_column: "team",
                entity: "Man Utd".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_team_duplicate_standing() {
        let bundle = DatasetBundle::new(Tables {
            standings: vec![standing("Arsenal", 1), standing("Arsenal", 2)],
            team_stats: vec![team_stats("Arsenal")],
            ..Tables::default()
        });

        let err = EntityResolver::resolve_team(&bundle, "Arsenal").unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::Ambiguous { table: TableName::Standings, count: 2, .. }
        ));
    }

    // ── resolve_player ────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_player_across_key_columns() {
        let bundle = sample_bundle();
        let record = EntityResolver::resolve_player(&bundle, "Bukayo Saka").unwrap();
        assert_eq!(record.stats.team, "Arsenal");
        assert_eq!(record.possession.successful_take_ons, 45);
        assert_eq!(record.salary.weekly, 195_000);
    }

    #[test]
    fn test_resolve_player_missing_salary_names_table() {
        let bundle = sample_bundle();
        // Present in player stats and possession, absent from salaries.
        let err = EntityResolver::resolve_player(&bundle, "Cole Palmer").unwrap_err();
        assert_eq!(err.table(), TableName::PlayerSalaries);
        assert!(err.to_string().contains("player_salaries"));
    }

    #[test]
    fn test_resolve_player_unknown_names_stats_table() {
        let bundle = sample_bundle();
        let err = EntityResolver::resolve_player(&bundle, "Nobody").unwrap_err();
        assert_eq!(err.table(), TableName::PlayerStats);
    }
}
