//! League views assembled from resolution, filtering and aggregation.
//!
//! Each function is a pure read of the bundle plus the caller's selection
//! and returns plain structured data ready for rendering.

use std::collections::HashSet;

use league_core::error::{DataError, ResolutionError};
use league_core::form::{form_points, parse_form, FormResult};
use league_core::models::{Fixture, Standing};
use league_core::selection::{DateRange, TeamSelection, ALL_TEAMS_LABEL};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::aggregator::{AggregationEngine, ResultTally, SalaryShare, TouchZones};
use crate::filter::FixtureFilter;
use crate::resolver::{EntityResolver, PlayerRecord, TeamRecord};
use crate::store::DatasetBundle;

// ── Public types ──────────────────────────────────────────────────────────────

/// Recent form of one team from the league table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormLine {
    pub team: String,
    pub rank: u32,
    pub points: u32,
    pub form: Vec<FormResult>,
    /// Points collected over the form window.
    pub form_points: u32,
}

/// Everything the team view shows for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverview<'a> {
    pub record: TeamRecord<'a>,
    /// `None` when the team has no possession row.
    pub touch_zones: Option<TouchZones>,
    pub salary: Vec<SalaryShare>,
    pub weekly_wage_bill: u64,
}

/// Filtered fixtures and their results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureReport {
    pub team: TeamSelection,
    /// Range actually applied; `None` only when the fixture list is empty
    /// and no range was requested.
    pub range: Option<DateRange>,
    pub fixtures: Vec<Fixture>,
    /// `None` when no fixture survived the filter. A kept fixture without a
    /// score fails only the tally; the fixture list is still reported.
    #[serde(serialize_with = "serialize_tally")]
    pub tally: Option<Result<ResultTally, DataError>>,
}

/// Writes a tally as its counts, or as `{"error": "..."}` when it failed.
fn serialize_tally<S: Serializer>(
    tally: &Option<Result<ResultTally, DataError>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match tally {
        None => serializer.serialize_none(),
        Some(Ok(counts)) => counts.serialize(serializer),
        Some(Err(e)) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("error", &e.to_string())?;
            map.end()
        }
    }
}

// ── Standings view ────────────────────────────────────────────────────────────

/// League table ordered by rank. Equal ranks keep their table order.
pub fn league_table(bundle: &DatasetBundle) -> Vec<&Standing> {
    let mut rows: Vec<&Standing> = bundle.standings().iter().collect();
    rows.sort_by_key(|s| s.rank);
    rows
}

/// Recent form for the requested teams, in league-table order.
///
/// Names without a standings row are skipped.
pub fn form_comparison(bundle: &DatasetBundle, teams: &[String]) -> Vec<FormLine> {
    let wanted: HashSet<&str> = teams.iter().map(String::as_str).collect();

    league_table(bundle)
        .into_iter()
        .filter(|s| wanted.contains(s.team.as_str()))
        .map(|s| {
            let form = parse_form(&s.last5);
            FormLine {
                team: s.team.clone(),
                rank: s.rank,
                points: s.points,
                form_points: form_points(&form),
                form,
            }
        })
        .collect()
}

// ── Selector options ──────────────────────────────────────────────────────────

/// Team names offered by the team view, in first-seen order.
pub fn team_choices(bundle: &DatasetBundle) -> Vec<&str> {
    unique(bundle.team_stats().iter().map(|r| r.team.as_str()))
}

/// Player names offered by the player view, in first-seen order.
pub fn player_choices(bundle: &DatasetBundle) -> Vec<&str> {
    unique(bundle.player_stats().iter().map(|r| r.name.as_str()))
}

/// Fixture team filter options: the all-teams label, then every home team.
pub fn fixture_team_choices(bundle: &DatasetBundle) -> Vec<&str> {
    let mut choices = vec![ALL_TEAMS_LABEL];
    choices.extend(unique(bundle.fixtures().iter().map(|f| f.home.as_str())));
    choices
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}

// ── Team / player views ───────────────────────────────────────────────────────

/// Resolve `team` and derive its touch zones and wage distribution.
pub fn team_overview<'a>(
    bundle: &'a DatasetBundle,
    team: &str,
) -> Result<TeamOverview<'a>, ResolutionError> {
    let record = EntityResolver::resolve_team(bundle, team)?;
    let touch_zones = record
        .team_possession
        .map(AggregationEngine::touch_zone_breakdown);
    let salary = AggregationEngine::salary_breakdown(record.team_salary_rows.iter().copied());
    let weekly_wage_bill = AggregationEngine::weekly_total(&salary);

    Ok(TeamOverview {
        record,
        touch_zones,
        salary,
        weekly_wage_bill,
    })
}

/// Resolve `name` in every player table.
pub fn player_profile<'a>(
    bundle: &'a DatasetBundle,
    name: &str,
) -> Result<PlayerRecord<'a>, ResolutionError> {
    EntityResolver::resolve_player(bundle, name)
}

// ── Fixtures view ─────────────────────────────────────────────────────────────

/// Filter fixtures by `team` and `range` and tally the results.
///
/// Without a range the full span of the fixture list is used. The tally is
/// skipped for an empty selection and holds the error if any kept fixture
/// is missing a score.
pub fn fixture_report(
    bundle: &DatasetBundle,
    team: &TeamSelection,
    range: Option<DateRange>,
) -> FixtureReport {
    let range = range.or_else(|| FixtureFilter::date_bounds(bundle.fixtures()));

    let fixtures = match range {
        Some(range) => FixtureFilter::apply(bundle.fixtures(), team, range),
        None => Vec::new(),
    };

    let tally = if fixtures.is_empty() {
        None
    } else {
        let result = AggregationEngine::result_tally(&fixtures);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "result tally unavailable");
        }
        Some(result)
    };

    FixtureReport {
        team: team.clone(),
        range,
        fixtures,
        tally,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
