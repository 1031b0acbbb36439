use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::record::RawRow;

const LEAGUES: &[(&str, &[&str])] = &[
    (
        "Premier League",
        &[
            "Arsenal",
            "Liverpool",
            "Manchester City",
            "Chelsea",
            "Newcastle",
            "Brighton",
        ],
    ),
    (
        "La Liga",
        &[
            "Real Madrid",
            "Barcelona",
            "Atletico Madrid",
            "Sevilla",
            "Real Sociedad",
            "Villarreal",
        ],
    ),
    (
        "Serie A",
        &["Inter", "Milan", "Juventus", "Napoli", "Roma", "Atalanta"],
    ),
    (
        "Bundesliga",
        &[
            "Bayern Munich",
            "Dortmund",
            "Leverkusen",
            "Leipzig",
            "Stuttgart",
            "Frankfurt",
        ],
    ),
];

const KICKOFFS: &[&str] = &["12:30", "14:00", "15:00", "17:30", "18:45", "20:00", "21:00"];

// Rough shape of per-side goals in top-flight football.
const GOAL_WEIGHTS: &[u32] = &[25, 35, 22, 11, 5, 2];

/// Deterministic synthetic fixture table for demos and benchmarks.
///
/// About one row in ten is malformed on purpose (missing or non-numeric
/// scores, unusable kickoff times) so the cleaner has something to do.
pub fn generate_sample_rows(count: usize, seed: u64) -> Vec<RawRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2025, 8, 16).unwrap_or_default();
    let mut out = Vec::with_capacity(count);

    for idx in 0..count {
        let (league, teams) = LEAGUES[rng.gen_range(0..LEAGUES.len())];
        let home_idx = rng.gen_range(0..teams.len());
        let mut away_idx = rng.gen_range(0..teams.len() - 1);
        if away_idx >= home_idx {
            away_idx += 1;
        }
        let date = base + Duration::days((idx / 12) as i64 * 7);

        let mut row = RawRow {
            date: Some(date.format("%Y-%m-%d").to_string()),
            time: Some(KICKOFFS[rng.gen_range(0..KICKOFFS.len())].to_string()),
            league: Some(league.to_string()),
            home: Some(teams[home_idx].to_string()),
            away: Some(teams[away_idx].to_string()),
            score_home: Value::from(sample_goals(&mut rng)),
            score_away: Value::from(sample_goals(&mut rng)),
        };

        match rng.gen_range(0..100) {
            0..=3 => row.score_home = Value::Null,
            4..=5 => row.score_away = Value::String("TBD".to_string()),
            6..=9 => row.time = Some("TBD".to_string()),
            10..=29 => {
                // Some exports carry scores as text.
                row.score_home = Value::String(value_text(&row.score_home));
            }
            _ => {}
        }
        out.push(row);
    }
    out
}

fn sample_goals(rng: &mut StdRng) -> u32 {
    let total: u32 = GOAL_WEIGHTS.iter().sum();
    let mut pick = rng.gen_range(0..total);
    for (goals, weight) in GOAL_WEIGHTS.iter().enumerate() {
        if pick < *weight {
            return goals as u32;
        }
        pick -= weight;
    }
    0
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
