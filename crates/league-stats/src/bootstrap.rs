use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use league_core::selection::{DateRange, Selection, TeamSelection, ALL_TEAMS_LABEL};
use league_core::settings::Settings;
use league_core::LeagueError;
use league_data::analysis::{player_choices, team_choices};
use league_data::filter::FixtureFilter;
use league_data::DatasetBundle;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.league-stats/` and `~/.league-stats/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".league-stats");
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr; when `log_file` is given it is also appended to
/// that file without ANSI colours.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Map the CLI level names onto `tracing` directives.
fn level_directive(log_level: &str) -> &str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Pick the data directory.
///
/// The configured directory wins when it exists; otherwise
/// `~/.league-stats/data` is used if present. Falls back to the configured
/// path so the load reports a precise missing-source error.
pub fn resolve_data_dir(configured: &Path) -> PathBuf {
    if configured.is_dir() {
        return configured.to_path_buf();
    }
    dirs::home_dir()
        .map(|home| home.join(".league-stats").join("data"))
        .filter(|p| p.is_dir())
        .unwrap_or_else(|| configured.to_path_buf())
}

// ── Selection ──────────────────────────────────────────────────────────────────

/// Build the session selection from settings.
///
/// Mirrors the selector defaults of an interactive front end: the team and
/// player views fall back to the first available entity (the all-teams
/// label is not a team), and the fixtures view fills a missing date bound
/// from the fixture list.
pub fn build_selection(settings: &Settings, bundle: &DatasetBundle) -> Result<Selection, LeagueError> {
    match settings.view.as_str() {
        "standings" => Ok(Selection::Standings {
            compare: settings.compare.clone(),
        }),
        "team" => {
            let team = match settings.team.as_deref() {
                Some(team) if team != ALL_TEAMS_LABEL => team.to_string(),
                _ => first_choice(team_choices(bundle), "team")?,
            };
            Ok(Selection::Team { team })
        }
        "player" => {
            let name = match &settings.player {
                Some(name) => name.clone(),
                None => first_choice(player_choices(bundle), "player")?,
            };
            Ok(Selection::Player { name })
        }
        "fixtures" => {
            let team = TeamSelection::from_label(settings.team.as_deref().unwrap_or(ALL_TEAMS_LABEL));
            let (from, to) = settings.date_bounds()?;
            let bounds = FixtureFilter::date_bounds(bundle.fixtures());
            let range = match (from, to, bounds) {
                (Some(from), Some(to), _) => Some(DateRange::new(from, to)),
                (Some(from), None, Some(b)) => Some(DateRange::new(from, b.to)),
                (None, Some(to), Some(b)) => Some(DateRange::new(b.from, to)),
                _ => None,
            };
            Ok(Selection::Fixtures { team, range })
        }
        other => Err(LeagueError::Config(format!("unknown view: {other}"))),
    }
}

fn first_choice(choices: Vec<&str>, kind: &str) -> Result<String, LeagueError> {
    choices
        .first()
        .map(|s| s.to_string())
        .ok_or_else(|| LeagueError::Config(format!("no {kind} available to select")))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
