use serde::Serialize;
use serde_json::Value;

use crate::record::{MatchRecord, RawRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub total: usize,
    pub kept: usize,
    pub dropped_missing: usize,
    pub dropped_invalid: usize,
}

impl CleanStats {
    pub fn dropped(&self) -> usize {
        self.dropped_missing + self.dropped_invalid
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScoreCell {
    Missing,
    Invalid,
    Goals(f64),
}

/// Keeps only rows whose two scores coerce to usable numbers.
///
/// Malformed rows are dropped silently; an input where every row is malformed
/// produces an empty table.
pub fn clean(rows: &[RawRow]) -> Vec<MatchRecord> {
    clean_with_stats(rows).0
}

pub fn clean_with_stats(rows: &[RawRow]) -> (Vec<MatchRecord>, CleanStats) {
    let mut stats = CleanStats {
        total: rows.len(),
        ..CleanStats::default()
    };
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let home = coerce_score(&row.score_home);
        let away = coerce_score(&row.score_away);
        let (score_home, score_away) = match (home, away) {
            (ScoreCell::Goals(h), ScoreCell::Goals(a)) => (h, a),
            (ScoreCell::Missing, _) | (_, ScoreCell::Missing) => {
                stats.dropped_missing += 1;
                continue;
            }
            _ => {
                stats.dropped_invalid += 1;
                continue;
            }
        };

        out.push(MatchRecord {
            date: row.date.clone().unwrap_or_default(),
            time: row.time.clone(),
            league: row.league.clone().unwrap_or_default(),
            home: row.home.clone().unwrap_or_default(),
            away: row.away.clone().unwrap_or_default(),
            score_home,
            score_away,
        });
    }

    stats.kept = out.len();
    (out, stats)
}

fn coerce_score(cell: &Value) -> ScoreCell {
    let parsed = match cell {
        Value::Null => return ScoreCell::Missing,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return ScoreCell::Missing;
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    };
    match parsed {
        Some(goals) if goals.is_finite() && goals >= 0.0 => {
            // -0.0 would otherwise leak into output as "-0".
            ScoreCell::Goals(if goals == 0.0 { 0.0 } else { goals })
        }
        _ => ScoreCell::Invalid,
    }
}
