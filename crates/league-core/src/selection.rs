//! Immutable description of what a session is currently looking at.
//!
//! A [`Selection`] is passed by value into every query; nothing in the core
//! reads selection state from anywhere else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display label of the "no team filter" choice in the fixtures view.
pub const ALL_TEAMS_LABEL: &str = "All Teams";

/// Team predicate for fixture filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSelection {
    /// Sentinel: keep fixtures for every team.
    AllTeams,
    /// Keep fixtures where this exact name plays home or away.
    Team(String),
}

impl TeamSelection {
    /// Map a selector label to a selection; the [`ALL_TEAMS_LABEL`] label
    /// becomes the sentinel.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_TEAMS_LABEL {
            TeamSelection::AllTeams
        } else {
            TeamSelection::Team(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamSelection::AllTeams => ALL_TEAMS_LABEL,
            TeamSelection::Team(name) => name,
        }
    }
}

/// Inclusive calendar-date range. `from > to` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

/// Which derived view a session wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Selection {
    /// League table plus an optional recent-form comparison.
    Standings { compare: Vec<String> },
    /// Overview of one team.
    Team { team: String },
    /// Profile of one player.
    Player { name: String },
    /// Fixtures narrowed by team and date range. `range: None` means the full
    /// span of the fixture list.
    Fixtures {
        team: TeamSelection,
        range: Option<DateRange>,
    },
}

impl Selection {
    /// Short view name, matching the `--view` values of the CLI.
    pub fn view_name(&self) -> &'static str {
        match self {
            Selection::Standings { .. } => "standings",
            Selection::Team { .. } => "team",
            Selection::Player { .. } => "player",
            Selection::Fixtures { .. } => "fixtures",
        }
    }
}
