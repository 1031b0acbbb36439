use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One untrusted input row, as handed over by a CSV file, a JSON dump or an
/// API response. Score cells keep whatever type the source used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub league: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub home: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub away: Option<String>,
    #[serde(default)]
    pub score_home: Value,
    #[serde(default)]
    pub score_away: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: String,
    pub time: Option<String>,
    pub league: String,
    pub home: String,
    pub away: String,
    pub score_home: f64,
    pub score_away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::HomeWin => "Home Win",
            Outcome::AwayWin => "Away Win",
            Outcome::Draw => "Draw",
        }
    }
}

/// Result of a match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamResult {
    Win,
    Draw,
    Loss,
}

impl TeamResult {
    pub fn from_scores(scored: f64, conceded: f64) -> Self {
        if scored > conceded {
            TeamResult::Win
        } else if scored == conceded {
            TeamResult::Draw
        } else {
            TeamResult::Loss
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamResult::Win => "Win",
            TeamResult::Draw => "Draw",
            TeamResult::Loss => "Loss",
        }
    }
}

impl MatchRecord {
    pub fn total_goals(&self) -> f64 {
        self.score_home + self.score_away
    }

    pub fn goal_diff(&self) -> f64 {
        (self.score_home - self.score_away).abs()
    }

    pub fn outcome(&self) -> Outcome {
        if self.score_home == self.score_away {
            Outcome::Draw
        } else if self.score_home > self.score_away {
            Outcome::HomeWin
        } else {
            Outcome::AwayWin
        }
    }

    pub fn kickoff_hour(&self) -> Option<u32> {
        self.time.as_deref().and_then(kickoff_hour)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    // Either side kept a clean sheet.
    pub fn is_clean_sheet(&self) -> bool {
        self.score_home == 0.0 || self.score_away == 0.0
    }

    pub fn is_goalless(&self) -> bool {
        self.score_home == 0.0 && self.score_away == 0.0
    }

    pub fn scoreline(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home,
            format_goals(self.score_home),
            format_goals(self.score_away),
            self.away
        )
    }

    pub fn to_raw(&self) -> RawRow {
        RawRow {
            date: non_empty(&self.date),
            time: self.time.clone(),
            league: non_empty(&self.league),
            home: non_empty(&self.home),
            away: non_empty(&self.away),
            score_home: Value::from(self.score_home),
            score_away: Value::from(self.score_away),
        }
    }
}

/// A cleaned record plus its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub total_goals: f64,
    pub goal_diff: f64,
    pub outcome: Outcome,
}

impl EnrichedMatch {
    pub fn new(record: &MatchRecord) -> Self {
        Self {
            record: record.clone(),
            total_goals: record.total_goals(),
            goal_diff: record.goal_diff(),
            outcome: record.outcome(),
        }
    }
}

/// Hour of a kickoff given as `HH:MM`. Anything else yields `None`.
pub fn kickoff_hour(raw: &str) -> Option<u32> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .ok()
        .map(|t| t.hour())
}

pub fn format_goals(goals: f64) -> String {
    if goals.fract() == 0.0 {
        format!("{goals:.0}")
    } else {
        format!("{goals}")
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

// Text columns in loose dumps are sometimes numbers (e.g. a league id instead of a name).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
