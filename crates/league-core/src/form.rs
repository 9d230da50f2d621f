//! Parsing of the league table's recent-form column.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of one recent match from a team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    /// League points awarded for this outcome.
    pub fn points(&self) -> u32 {
        match self {
            FormResult::Win => 3,
            FormResult::Draw => 1,
            FormResult::Loss => 0,
        }
    }
}

fn outcome_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[WDLwdl]").expect("valid form pattern"))
}

/// Parse a form string such as `"WWDLW"`, `"W D L W W"` or `"W-D-L"`.
///
/// Separators and unknown characters are ignored; letters are read oldest
/// first, exactly as published.
pub fn parse_form(last5: &str) -> Vec<FormResult> {
    outcome_pattern()
        .find_iter(last5)
        .filter_map(|m| match m.as_str() {
            "W" | "w" => Some(FormResult::Win),
            "D" | "d" => Some(FormResult::Draw),
            "L" | "l" => Some(FormResult::Loss),
            _ => None,
        })
        .collect()
}

/// Total points earned across a parsed form line.
pub fn form_points(form: &[FormResult]) -> u32 {
    form.iter().map(FormResult::points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use FormResult::*;

    #[test]
    fn test_parse_compact_form() {
        assert_eq!(parse_form("WWDLW"), vec![Win, Win, Draw, Loss, Win]);
    }

    #[test]
    fn test_parse_separated_form() {
        assert_eq!(parse_form("W D L"), vec![Win, Draw, Loss]);
        assert_eq!(parse_form("w-d-l"), vec![Win, Draw, Loss]);
    }

    #[test]
    fn test_parse_empty_form() {
        assert!(parse_form("").is_empty());
        assert!(parse_form("--").is_empty());
    }

    #[test]
    fn test_form_points() {
        assert_eq!(form_points(&parse_form("WWDLW")), 10);
        assert_eq!(form_points(&[]), 0);
    }
}
