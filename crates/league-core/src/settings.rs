use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dates::parse_date_bound;
use crate::error::LeagueError;
use crate::selection::ALL_TEAMS_LABEL;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// League statistics views over a directory of CSV tables
#[derive(Parser, Debug, Clone)]
#[command(
    name = "league-stats",
    about = "League statistics views over a directory of CSV tables",
    version
)]
pub struct Settings {
    /// Directory holding the eight source tables
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// View to compute
    #[arg(long, default_value = "standings", value_parser = ["standings", "team", "player", "fixtures"])]
    pub view: String,

    /// Team for the team view, or fixture team filter ("All Teams" for none)
    #[arg(long)]
    pub team: Option<String>,

    /// Player for the player view
    #[arg(long)]
    pub player: Option<String>,

    /// First fixture date to include (inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Last fixture date to include (inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Teams to compare recent form for in the standings view
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.league-stats/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// Team picked in the team view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Team filter of the fixtures view; may be the all-teams label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl LastUsedParams {
    /// Default path of the persisted file: `~/.league-stats/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".league-stats").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, fill in last-used values where no explicit CLI
    /// value was given, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit args and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear saved configuration");
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over the saved value.
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = &last.data_dir {
                settings.data_dir = v.clone();
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = &last.view {
                settings.view = v.clone();
            }
        }
        if settings.team.is_none() {
            settings.team = last.team_for_view(&settings.view);
        }
        if settings.player.is_none() {
            settings.player = last.player.clone();
        }

        let params = last.updated_from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!(error = %e, "could not persist last-used parameters");
        }

        settings.apply_debug()
    }

    /// Parsed `--from` / `--to` bounds.
    pub fn date_bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), LeagueError> {
        let from = self.from.as_deref().map(parse_date_bound).transpose()?;
        let to = self.to.as_deref().map(parse_date_bound).transpose()?;
        Ok((from, to))
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Merge rules ────────────────────────────────────────────────────────────────

impl LastUsedParams {
    /// Saved `--team` value for `view`.
    ///
    /// The team view and the fixtures filter keep separate values, and the
    /// all-teams label is never handed to the team view.
    fn team_for_view(&self, view: &str) -> Option<String> {
        match view {
            "team" => self
                .team
                .clone()
                .filter(|team| team.as_str() != ALL_TEAMS_LABEL),
            "fixtures" => self.fixture_team.clone(),
            _ => None,
        }
    }

    /// Params to persist after a run with `settings`. `--team` is stored in
    /// the slot of the view it was used with; the other slot is kept.
    fn updated_from(&self, settings: &Settings) -> Self {
        let mut next = LastUsedParams {
            data_dir: Some(settings.data_dir.clone()),
            view: Some(settings.view.clone()),
            player: settings.player.clone(),
            ..self.clone()
        };
        match settings.view.as_str() {
            "team" => next.team = settings.team.clone(),
            "fixtures" => next.fixture_team = settings.team.clone(),
            _ => {}
        }
        next
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["league-stats"]);

        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.view, "standings");
        assert!(settings.team.is_none());
        assert!(settings.player.is_none());
        assert!(settings.compare.is_empty());
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_compare_is_comma_separated() {
        let settings = Settings::parse_from(["league-stats", "--compare", "Arsenal,Chelsea"]);
        assert_eq!(settings.compare, vec!["Arsenal", "Chelsea"]);
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let params = LastUsedParams {
            data_dir: Some(PathBuf::from("/srv/league")),
            view: Some("fixtures".to_string()),
            team: Some("Arsenal".to_string()),
            fixture_team: Some("All Teams".to_string()),
            player: None,
        };

        params.save_to(&path).expect("save");
        assert_eq!(LastUsedParams::load_from(&path), params);
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&LastUsedParams::config_path_in(tmp.path()));
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_saved_values_fill_unset_args() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            data_dir: Some(PathBuf::from("/srv/league")),
            view: Some("team".to_string()),
            team: Some("Chelsea".to_string()),
            fixture_team: None,
            player: Some("Cole Palmer".to_string()),
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(args(&["league-stats"]), &path);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/league"));
        assert_eq!(settings.view, "team");
        assert_eq!(settings.team.as_deref(), Some("Chelsea"));
        assert_eq!(settings.player.as_deref(), Some("Cole Palmer"));
    }

    #[test]
    fn test_cli_wins_over_saved_values() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            view: Some("team".to_string()),
            team: Some("Chelsea".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["league-stats", "--view", "fixtures", "--team", "Arsenal"]),
            &path,
        );
        assert_eq!(settings.view, "fixtures");
        assert_eq!(settings.team.as_deref(), Some("Arsenal"));

        // The fixture filter is persisted without touching the team view's pick.
        let saved = LastUsedParams::load_from(&path);
        assert_eq!(saved.fixture_team.as_deref(), Some("Arsenal"));
        assert_eq!(saved.team.as_deref(), Some("Chelsea"));
        assert_eq!(saved.view.as_deref(), Some("fixtures"));
    }

    #[test]
    fn test_all_teams_filter_does_not_leak_into_team_view() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());

        Settings::load_with_last_used_impl(
            args(&["league-stats", "--view", "fixtures", "--team", "All Teams"]),
            &path,
        );
        let team_run = Settings::load_with_last_used_impl(args(&["league-stats", "--view", "team"]), &path);
        assert!(team_run.team.is_none());

        // Returning to fixtures restores the filter.
        let fixtures_run =
            Settings::load_with_last_used_impl(args(&["league-stats", "--view", "fixtures"]), &path);
        assert_eq!(fixtures_run.team.as_deref(), Some("All Teams"));
    }

    #[test]
    fn test_team_view_pick_does_not_narrow_fixtures() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());

        Settings::load_with_last_used_impl(
            args(&["league-stats", "--view", "team", "--team", "Chelsea"]),
            &path,
        );
        let fixtures_run =
            Settings::load_with_last_used_impl(args(&["league-stats", "--view", "fixtures"]), &path);
        assert!(fixtures_run.team.is_none());

        let team_run = Settings::load_with_last_used_impl(args(&["league-stats", "--view", "team"]), &path);
        assert_eq!(team_run.team.as_deref(), Some("Chelsea"));
    }

    #[test]
    fn test_saved_all_teams_label_is_not_a_team_pick() {
        let params = LastUsedParams {
            team: Some("All Teams".to_string()),
            ..Default::default()
        };
        assert_eq!(params.team_for_view("team"), None);
        assert_eq!(params.team_for_view("standings"), None);
    }

    #[test]
    fn test_clear_removes_saved_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams::default().save_to(&path).expect("save");

        let settings = Settings::load_with_last_used_impl(args(&["league-stats", "--clear"]), &path);
        assert!(settings.clear);
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(args(&["league-stats", "--debug"]), &path);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_date_bounds() {
        let settings = Settings::parse_from(["league-stats", "--from", "2024-01-01"]);
        let (from, to) = settings.date_bounds().unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(to.is_none());

        let bad = Settings::parse_from(["league-stats", "--to", "soon"]);
        assert!(matches!(bad.date_bounds(), Err(LeagueError::InvalidDate(_))));
    }
}
