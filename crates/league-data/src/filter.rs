//! Team and date-range narrowing of the fixture list.

use chrono::NaiveDate;
use league_core::models::Fixture;
use league_core::selection::{DateRange, TeamSelection};

use crate::resolver::is_keyed_by;

/// Stateless fixture filtering.
pub struct FixtureFilter;

impl FixtureFilter {
    /// Keep fixtures played by `team` (home or away, exact match) dated
    /// within `from..=to`, ordered by date.
    ///
    /// Fixtures on the same date keep their table order. An inverted range
    /// or a team with no fixtures yields an empty list.
    pub fn filter(
        fixtures: &[Fixture],
        team: &TeamSelection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<Fixture> {
        Self::apply(fixtures, team, DateRange::new(from, to))
    }

    /// Same as [`FixtureFilter::filter`] with a prepared range.
    pub fn apply(fixtures: &[Fixture], team: &TeamSelection, range: DateRange) -> Vec<Fixture> {
        let mut kept: Vec<Fixture> = fixtures
            .iter()
            .filter(|f| match team {
                TeamSelection::AllTeams => true,
                TeamSelection::Team(name) => is_keyed_by(*f, name),
            })
            .filter(|f| range.contains(f.date))
            .cloned()
            .collect();

        // `sort_by_key` is stable.
        kept.sort_by_key(|f| f.date);

        tracing::debug!(
            team = team.label(),
            from = %range.from,
            to = %range.to,
            kept = kept.len(),
            of = fixtures.len(),
            "fixtures filtered"
        );
        kept
    }

    /// Earliest and latest fixture dates, or `None` for an empty list.
    pub fn date_bounds(fixtures: &[Fixture]) -> Option<DateRange> {
        let from = fixtures.iter().map(|f| f.date).min()?;
        let to = fixtures.iter().map(|f| f.date).max()?;
        Some(DateRange::new(from, to))
    }
}
