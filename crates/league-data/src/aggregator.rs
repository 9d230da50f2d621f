//! Derived figures over already-resolved rows.
//!
//! Nothing here touches the bundle: every function takes the rows it
//! summarises and either fully succeeds or returns an error.

use league_core::error::{DataError, ScoreSide};
use league_core::models::{Fixture, TeamPossession, TeamSalary};
use serde::Serialize;

// ── Output types ──────────────────────────────────────────────────────────────

/// Win/draw/loss counts from the home side's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultTally {
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
}

impl ResultTally {
    /// Number of classified fixtures.
    pub fn total(&self) -> usize {
        self.home_wins + self.away_wins + self.draws
    }
}

/// Touches per pitch third.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TouchZones {
    pub defensive: u64,
    pub middle: u64,
    pub attacking: u64,
}

impl TouchZones {
    pub fn total(&self) -> u64 {
        self.defensive + self.middle + self.attacking
    }
}

/// One slice of a team's weekly wage distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryShare {
    pub player: String,
    pub weekly: u64,
}

// ── AggregationEngine ─────────────────────────────────────────────────────────

/// Stateless aggregation functions.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Classify every fixture as a home win, away win or draw.
    ///
    /// The counts always add up to the number of fixtures given. A fixture
    /// without both scores cannot be classified and fails the whole tally.
    pub fn result_tally<'a, I>(fixtures: I) -> Result<ResultTally, DataError>
    where
        I: IntoIterator<Item = &'a Fixture>,
    {
        let mut tally = ResultTally::default();

        for fixture in fixtures {
            let home = fixture
                .home_score
                .ok_or_else(|| missing_score(fixture, ScoreSide::Home))?;
            let away = fixture
                .away_score
                .ok_or_else(|| missing_score(fixture, ScoreSide::Away))?;

            match home.cmp(&away) {
                std::cmp::Ordering::Greater => tally.home_wins += 1,
                std::cmp::Ordering::Less => tally.away_wins += 1,
                std::cmp::Ordering::Equal => tally.draws += 1,
            }
        }

        Ok(tally)
    }

    /// Project a possession row onto its three zone counts.
    pub fn touch_zone_breakdown(row: &TeamPossession) -> TouchZones {
        TouchZones {
            defensive: row.defensive_touches,
            middle: row.middle_touches,
            attacking: row.attacking_touches,
        }
    }

    /// One share per payroll row, in the order given.
    pub fn salary_breakdown<'a, I>(rows: I) -> Vec<SalaryShare>
    where
        I: IntoIterator<Item = &'a TeamSalary>,
    {
        rows.into_iter()
            .map(|row| SalaryShare {
                player: row.players.clone(),
                weekly: row.weekly,
            })
            .collect()
    }

    /// Sum of weekly wages across shares.
    pub fn weekly_total(shares: &[SalaryShare]) -> u64 {
        shares.iter().map(|s| s.weekly).sum()
    }
}

fn missing_score(fixture: &Fixture, side: ScoreSide) -> DataError {
    DataError::MissingScore {
        home: fixture.home.clone(),
        away: fixture.away.clone(),
        date: fixture.date,
        side,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture(home: &str, away: &str, day: u32, hs: Option<u32>, aws: Option<u32>) -> Fixture {
        Fixture {
            home: home.to_string(),
            away: away.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            home_score: hs,
            away_score: aws,
        }
    }

    fn salary(team: &str, player: &str, weekly: u64) -> TeamSalary {
        TeamSalary {
            team: team.to_string(),
            players: player.to_string(),
            weekly,
        }
    }

    // ── result_tally ──────────────────────────────────────────────────────────

    #[test]
    fn test_tally_classifies_each_fixture() {
        let fixtures = vec![
            fixture("Arsenal", "Chelsea", 1, Some(2), Some(1)),
            fixture("Chelsea", "Arsenal", 2, Some(0), Some(0)),
            fixture("Fulham", "Arsenal", 3, Some(1), Some(4)),
        ];
        let tally = AggregationEngine::result_tally(&fixtures).unwrap();

        assert_eq!(
            tally,
            ResultTally {
                home_wins: 1,
                away_wins: 1,
                draws: 1
            }
        );
        assert_eq!(tally.total(), fixtures.len());
    }

    #[test]
    fn test_tally_is_exhaustive() {
        let fixtures: Vec<Fixture> = (1..=20)
            .map(|day| fixture("A", "B", day, Some(day % 3), Some(day % 4)))
            .collect();
        let tally = AggregationEngine::result_tally(&fixtures).unwrap();
        assert_eq!(tally.total(), 20);
    }

    #[test]
    fn test_tally_empty() {
        let none: Vec<Fixture> = Vec::new();
        let tally = AggregationEngine::result_tally(&none).unwrap();
        assert_eq!(tally, ResultTally::default());
    }

    #[test]
    fn test_tally_missing_score_fails() {
        let fixtures = vec![
            fixture("Arsenal", "Chelsea", 1, Some(2), Some(1)),
            fixture("Arsenal", "Fulham", 9, Some(1), None),
        ];
        let err = AggregationEngine::result_tally(&fixtures).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingScore {
                home: "Arsenal".to_string(),
                away: "Fulham".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                side: ScoreSide::Away,
            }
        );
    }

    // ── touch_zone_breakdown ──────────────────────────────────────────────────

    #[test]
    fn test_touch_zone_projection() {
        let row = TeamPossession {
            team: "Arsenal".to_string(),
            defensive_touches: 5000,
            middle_touches: 9000,
            attacking_touches: 4000,
        };
        let zones = AggregationEngine::touch_zone_breakdown(&row);
        assert_eq!(zones.defensive, 5000);
        assert_eq!(zones.middle, 9000);
        assert_eq!(zones.attacking, 4000);
        assert_eq!(zones.total(), 18_000);
    }

    // ── salary_breakdown ──────────────────────────────────────────────────────

    #[test]
    fn test_salary_breakdown_keeps_every_row() {
        let rows = vec![
            salary("Arsenal", "Bukayo Saka", 195_000),
            salary("Arsenal", "Declan Rice", 240_000),
            salary("Arsenal", "Bukayo Saka", 5_000),
        ];
        let shares = AggregationEngine::salary_breakdown(&rows);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[1].player, "Declan Rice");
        assert_eq!(AggregationEngine::weekly_total(&shares), 440_000);
    }

    #[test]
    fn test_salary_breakdown_empty() {
        let none: Vec<TeamSalary> = Vec::new();
        let shares = AggregationEngine::salary_breakdown(&none);
        assert!(shares.is_empty());
        assert_eq!(AggregationEngine::weekly_total(&shares), 0);
    }
}
