use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;

/// Logical name of one of the eight source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Standings,
    Fixtures,
    TeamStats,
    TeamPossession,
    TeamSalary,
    PlayerStats,
    PlayerPossession,
    PlayerSalaries,
}

impl TableName {
    /// Every table, in load order.
    pub const ALL: [TableName; 8] = [
        TableName::Fixtures,
        TableName::PlayerPossession,
        TableName::PlayerSalaries,
        TableName::PlayerStats,
        TableName::Standings,
        TableName::TeamPossession,
        TableName::TeamSalary,
        TableName::TeamStats,
    ];

    /// Logical name used as the bundle key and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Standings => "standings",
            TableName::Fixtures => "fixtures",
            TableName::TeamStats => "team_stats",
            TableName::TeamPossession => "team_possession",
            TableName::TeamSalary => "team_salary",
            TableName::PlayerStats => "player_stats",
            TableName::PlayerPossession => "player_possession",
            TableName::PlayerSalaries => "player_salaries",
        }
    }

    /// File name of the table's source inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableName::Standings => "standings.csv",
            TableName::Fixtures => "fixtures.csv",
            TableName::TeamStats => "team_stats.csv",
            TableName::TeamPossession => "team_possession_stats.csv",
            TableName::TeamSalary => "team_salary.csv",
            TableName::PlayerStats => "player_stats.csv",
            TableName::PlayerPossession => "player_possession_stats.csv",
            TableName::PlayerSalaries => "player_salaries.csv",
        }
    }

    /// Columns that must appear in the header row.
    ///
    /// Each entry lists the accepted spellings of one logical column; any one
    /// of them satisfies the requirement.
    pub fn required_columns(&self) -> &'static [&'static [&'static str]] {
        match self {
            TableName::Standings => &[&["team"], &["rank"], &["points"], &["last5"]],
            TableName::Fixtures => &[
                &["Home"],
                &["Away"],
                &["Date"],
                &["HomeScore"],
                &["AwayScore"],
            ],
            TableName::TeamStats => &[
                &["team"],
                &["goals"],
                &["expected_goals"],
                &["possession"],
                &["progressive_passes"],
                &["yellows"],
                &["reds"],
            ],
            TableName::TeamPossession => &[
                &["team"],
                &["deffensive_touches", "defensive_touches"],
                &["middle_touches"],
                &["attacking_touches"],
            ],
            TableName::TeamSalary => &[&["team"], &["players"], &["weekly"]],
            TableName::PlayerStats => &[
                &["name"],
                &["team"],
                &["position"],
                &["age"],
                &["goals"],
                &["assists"],
            ],
            TableName::PlayerPossession => &[&["player"], &["successful_take_ons"]],
            TableName::PlayerSalaries => &[&["Player"], &["Weekly"], &["Annual"]],
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed row of one source table.
///
/// Text columns are exposed by their source header so that lookups can be
/// driven by a column-name map instead of per-table accessor code.
pub trait Row {
    const TABLE: TableName;

    /// Value of the text column named `column`, if this row type has one.
    fn text(&self, column: &str) -> Option<&str>;
}

// ── Team tables ───────────────────────────────────────────────────────────────

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team: String,
    pub rank: u32,
    pub points: u32,
    /// Recent form string as published, e.g. `"WWDLW"`.
    pub last5: String,
}

impl Row for Standing {
    const TABLE: TableName = TableName::Standings;

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "team" => Some(self.team.as_str()),
            "last5" => Some(self.last5.as_str()),
            _ => None,
        }
    }
}

/// One match, played or scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename = "Home")]
    pub home: String,
    #[serde(rename = "Away")]
    pub away: String,
    /// Calendar date of the match; any time-of-day in the source is dropped.
    #[serde(rename = "Date", deserialize_with = "dates::deserialize_match_date")]
    pub date: NaiveDate,
    #[serde(rename = "HomeScore", deserialize_with = "deserialize_score")]
    pub home_score: Option<u32>,
    #[serde(rename = "AwayScore", deserialize_with = "deserialize_score")]
    pub away_score: Option<u32>,
}

impl Row for Fixture {
    const TABLE: TableName = TableName::Fixtures;

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "Home" => Some(self.home.as_str()),
            "Away" => Some(self.away.as_str()),
            _ => None,
        }
    }
}

/// Season totals for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: String,
    pub goals: u32,
    pub expected_goals: f64,
    /// Average possession as a percentage.
    pub possession: f64,
    pub progressive_passes: u32,
    pub yellows: u32,
    pub reds: u32,
}

impl Row for TeamStats {
    const TABLE: TableName = TableName::TeamStats;

    fn text(&self, column: &str) -> Option<&str> {
        (column == "team").then_some(self.team.as_str())
    }
}

/// Touch counts per pitch third for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPossession {
    pub team: String,
    #[serde(rename = "deffensive_touches", alias = "defensive_touches")]
    pub defensive_touches: u64,
    pub middle_touches: u64,
    pub attacking_touches: u64,
}

impl Row for TeamPossession {
    const TABLE: TableName = TableName::TeamPossession;

    fn text(&self, column: &str) -> Option<&str> {
        (column == "team").then_some(self.team.as_str())
    }
}

/// One player's wage line on a team's payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSalary {
    pub team: String,
    pub players: String,
    pub weekly: u64,
}

impl Row for TeamSalary {
    const TABLE: TableName = TableName::TeamSalary;

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "team" => Some(self.team.as_str()),
            "players" => Some(self.players.as_str()),
            _ => None,
        }
    }
}

// ── Player tables ─────────────────────────────────────────────────────────────

/// Season totals for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub team: String,
    pub position: String,
    pub age: u32,
    pub goals: u32,
    pub assists: u32,
    #[serde(default)]
    pub expected_goals: Option<f64>,
    #[serde(default)]
    pub progressive_carries: Option<u32>,
    #[serde(default)]
    pub progressive_passes: Option<u32>,
    #[serde(default)]
    pub minutes: Option<u32>,
}

impl Row for PlayerStats {
    const TABLE: TableName = TableName::PlayerStats;

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(self.name.as_str()),
            "team" => Some(self.team.as_str()),
            "position" => Some(self.position.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPossession {
    pub player: String,
    pub successful_take_ons: u32,
}

impl Row for PlayerPossession {
    const TABLE: TableName = TableName::PlayerPossession;

    fn text(&self, column: &str) -> Option<&str> {
        (column == "player").then_some(self.player.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSalary {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Weekly")]
    pub weekly: u64,
    #[serde(rename = "Annual")]
    pub annual: u64,
}

impl Row for PlayerSalary {
    const TABLE: TableName = TableName::PlayerSalaries;

    fn text(&self, column: &str) -> Option<&str> {
        (column == "Player").then_some(self.player.as_str())
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Deserialize a goal count that may be blank (match not played yet).
///
/// Sources exported through a dataframe write integer columns containing
/// blanks as floats (`"2.0"`), so whole-number floats are accepted.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(goals) = trimmed.parse::<u32>() {
        return Ok(Some(goals));
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => Ok(Some(f as u32)),
        _ => Err(serde::de::Error::custom(format!(
            "invalid score \"{trimmed}\""
        ))),
    }
}
