//! Per-session query execution over the shared bundle.
//!
//! A [`Session`] pairs an `Arc` of the immutable bundle with the session's
//! own [`Selection`]. Changing what the user looks at builds a new session
//! value; the bundle itself is never touched, so any number of sessions may
//! run side by side on the same snapshot.

use std::sync::Arc;

use league_core::error::Result;
use league_core::models::Standing;
use league_core::selection::Selection;
use league_data::analysis::{self, FixtureReport, FormLine, TeamOverview};
use league_data::resolver::PlayerRecord;
use league_data::store::DatasetBundle;
use serde::Serialize;

// ── ViewOutput ────────────────────────────────────────────────────────────────

/// Structured result of running one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewOutput<'a> {
    Standings {
        table: Vec<&'a Standing>,
        form: Vec<FormLine>,
    },
    Team(TeamOverview<'a>),
    Player(PlayerRecord<'a>),
    Fixtures(FixtureReport),
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Session {
    bundle: Arc<DatasetBundle>,
    selection: Selection,
}

impl Session {
    pub fn new(bundle: Arc<DatasetBundle>, selection: Selection) -> Self {
        Self { bundle, selection }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn bundle(&self) -> &DatasetBundle {
        &self.bundle
    }

    /// A session on the same bundle looking at something else.
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            bundle: Arc::clone(&self.bundle),
            selection,
        }
    }

    /// Compute the view for the current selection.
    pub fn run(&self) -> Result<ViewOutput<'_>> {
        tracing::debug!(view = self.selection.view_name(), "running selection");

        let bundle: &DatasetBundle = &self.bundle;
        let output = match &self.selection {
            Selection::Standings { compare } => ViewOutput::Standings {
                table: analysis::league_table(bundle),
                form: analysis::form_comparison(bundle, compare),
            },
            Selection::Team { team } => ViewOutput::Team(analysis::team_overview(bundle, team)?),
            Selection::Player { name } => {
                ViewOutput::Player(analysis::player_profile(bundle, name)?)
            }
            Selection::Fixtures { team, range } => {
                ViewOutput::Fixtures(analysis::fixture_report(bundle, team, *range))
            }
        };

        Ok(output)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
