use std::env;

use crate::aggregate::LeagueFilter;
use crate::report::{DEFAULT_OVER_UNDER_LINE, DEFAULT_TOP_N, ReportOptions};

pub const DEFAULT_DEMO_ROWS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub league: LeagueFilter,
    pub team: Option<String>,
    pub top_n: usize,
    pub over_under_line: f64,
    pub demo_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            league: LeagueFilter::All,
            team: None,
            top_n: DEFAULT_TOP_N,
            over_under_line: DEFAULT_OVER_UNDER_LINE,
            demo_rows: DEFAULT_DEMO_ROWS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads values through `lookup`.
    /// Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                if val.trim().is_empty() {
                    None
                } else {
                    Some(val)
                }
            })
        };

        let league = opt("FIXTURES_LEAGUE")
            .map(|val| LeagueFilter::from_label(&val))
            .unwrap_or_default();
        let team = opt("FIXTURES_TEAM").map(|val| val.trim().to_string());
        let top_n = opt("FIXTURES_TOP_N")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOP_N)
            .clamp(1, 50);
        let over_under_line = opt("FIXTURES_OVER_UNDER_LINE")
            .and_then(|val| parse_line(&val))
            .unwrap_or(DEFAULT_OVER_UNDER_LINE);
        let demo_rows = opt("FIXTURES_DEMO_ROWS")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_DEMO_ROWS)
            .clamp(1, 100_000);

        Self {
            league,
            team,
            top_n,
            over_under_line,
            demo_rows,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            league: self.league.clone(),
            team: self.team.clone(),
            top_n: self.top_n,
            over_under_line: self.over_under_line,
        }
    }
}

pub fn parse_line(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|line| line.is_finite() && *line >= 0.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_and_clamps_values() {
        let cfg = config_from(&[
            ("FIXTURES_LEAGUE", "La Liga"),
            ("FIXTURES_TEAM", " Getafe "),
            ("FIXTURES_TOP_N", "500"),
            ("FIXTURES_OVER_UNDER_LINE", "3.5"),
            ("FIXTURES_DEMO_ROWS", "0"),
        ]);
        assert_eq!(cfg.league, LeagueFilter::Named("La Liga".to_string()));
        assert_eq!(cfg.team.as_deref(), Some("Getafe"));
        assert_eq!(cfg.top_n, 50);
        assert_eq!(cfg.over_under_line, 3.5);
        assert_eq!(cfg.demo_rows, 1);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config_from(&[
            ("FIXTURES_LEAGUE", "  "),
            ("FIXTURES_TOP_N", "many"),
            ("FIXTURES_OVER_UNDER_LINE", "-1"),
        ]);
        assert_eq!(cfg.league, LeagueFilter::All);
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
        assert_eq!(cfg.over_under_line, DEFAULT_OVER_UNDER_LINE);
        assert_eq!(parse_line("inf"), None);
    }
}
