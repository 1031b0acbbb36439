use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::{EnrichedMatch, MatchRecord, Outcome, TeamResult};

pub const ALL_LEAGUES_LABEL: &str = "All Leagues";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeagueFilter {
    #[default]
    All,
    Named(String),
}

impl LeagueFilter {
    pub fn from_label(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL_LEAGUES_LABEL {
            LeagueFilter::All
        } else {
            LeagueFilter::Named(raw.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LeagueFilter::All => ALL_LEAGUES_LABEL,
            LeagueFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        match self {
            LeagueFilter::All => true,
            LeagueFilter::Named(name) => record.league == *name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryKpis {
    pub matches: usize,
    pub goals: f64,
    pub avg_goals: f64,
    pub draws: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeSplit {
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
}

impl OutcomeSplit {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::HomeWin => self.home_wins += 1,
            Outcome::AwayWin => self.away_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.home_wins + self.away_wins + self.draws
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchFacts {
    pub clean_sheets: usize,
    pub goalless_draws: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverUnder {
    pub line: f64,
    pub over: usize,
    pub under: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGoals {
    pub team: String,
    pub goals: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalBucket {
    pub total_goals: f64,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueGoals {
    pub league: String,
    pub total_goals: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueCount {
    pub league: String,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub league: String,
    pub hour: u32,
    pub total_goals: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Venue {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMatch {
    pub date: String,
    pub time: Option<String>,
    pub league: String,
    pub opponent: String,
    pub venue: Venue,
    pub scored: f64,
    pub conceded: f64,
    pub result: TeamResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TeamSummary {
    pub matches: usize,
    pub goals_scored: f64,
    pub goals_conceded: f64,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub team: String,
    pub matches: Vec<TeamMatch>,
    pub summary: TeamSummary,
}

pub fn enrich(records: &[MatchRecord]) -> Vec<EnrichedMatch> {
    records.iter().map(EnrichedMatch::new).collect()
}

pub fn filter_league(records: &[MatchRecord], filter: &LeagueFilter) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect()
}

pub fn leagues(records: &[MatchRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|m| !m.league.is_empty())
        .map(|m| m.league.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn teams(records: &[MatchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|m| [m.home.as_str(), m.away.as_str()])
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn summary_kpis(records: &[MatchRecord]) -> SummaryKpis {
    let matches = records.len();
    let goals: f64 = records.iter().map(MatchRecord::total_goals).sum();
    let avg_goals = if matches == 0 {
        0.0
    } else {
        round2(goals / matches as f64)
    };
    let draws = records
        .iter()
        .filter(|m| m.outcome() == Outcome::Draw)
        .count();
    SummaryKpis {
        matches,
        goals,
        avg_goals,
        draws,
    }
}

pub fn outcome_split(records: &[MatchRecord]) -> OutcomeSplit {
    let mut split = OutcomeSplit::default();
    for m in records {
        split.record(m.outcome());
    }
    split
}

pub fn outcomes_by_league(records: &[MatchRecord]) -> BTreeMap<String, OutcomeSplit> {
    let mut out: BTreeMap<String, OutcomeSplit> = BTreeMap::new();
    for m in records.iter().filter(|m| !m.league.is_empty()) {
        out.entry(m.league.clone()).or_default().record(m.outcome());
    }
    out
}

pub fn match_facts(records: &[MatchRecord]) -> MatchFacts {
    MatchFacts {
        clean_sheets: records.iter().filter(|m| m.is_clean_sheet()).count(),
        goalless_draws: records.iter().filter(|m| m.is_goalless()).count(),
    }
}

/// Counts matches strictly over `line` and at-or-under it.
pub fn over_under(records: &[MatchRecord], line: f64) -> OverUnder {
    let over = records.iter().filter(|m| m.total_goals() > line).count();
    let under = records.iter().filter(|m| m.total_goals() <= line).count();
    OverUnder { line, over, under }
}

pub fn top_scoring_matches(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    all_at_max(records, MatchRecord::total_goals)
}

pub fn biggest_margins(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    all_at_max(records, MatchRecord::goal_diff)
}

pub fn team_goals_for(records: &[MatchRecord]) -> BTreeMap<String, f64> {
    tally_teams(records, |m| {
        [(m.home.as_str(), m.score_home), (m.away.as_str(), m.score_away)]
    })
}

pub fn team_goals_conceded(records: &[MatchRecord]) -> BTreeMap<String, f64> {
    tally_teams(records, |m| {
        [(m.home.as_str(), m.score_away), (m.away.as_str(), m.score_home)]
    })
}

pub fn top_attacking_teams(records: &[MatchRecord], n: usize) -> Vec<TeamGoals> {
    let mut rows = team_rows(team_goals_for(records));
    rows.sort_by(|a, b| b.goals.total_cmp(&a.goals));
    rows.truncate(n);
    rows
}

/// Teams that conceded the fewest goals first.
pub fn top_defensive_teams(records: &[MatchRecord], n: usize) -> Vec<TeamGoals> {
    let mut rows = team_rows(team_goals_conceded(records));
    rows.sort_by(|a, b| a.goals.total_cmp(&b.goals));
    rows.truncate(n);
    rows
}

pub fn goal_distribution(records: &[MatchRecord]) -> Vec<GoalBucket> {
    let mut totals: Vec<f64> = records.iter().map(MatchRecord::total_goals).collect();
    totals.sort_by(f64::total_cmp);

    let mut out: Vec<GoalBucket> = Vec::new();
    for total in totals {
        match out.last_mut() {
            Some(bucket) if bucket.total_goals == total => bucket.matches += 1,
            _ => out.push(GoalBucket {
                total_goals: total,
                matches: 1,
            }),
        }
    }
    out
}

pub fn goals_by_league(records: &[MatchRecord]) -> Vec<LeagueGoals> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for m in records.iter().filter(|m| !m.league.is_empty()) {
        *sums.entry(m.league.as_str()).or_insert(0.0) += m.total_goals();
    }
    let mut rows: Vec<LeagueGoals> = sums
        .into_iter()
        .map(|(league, total_goals)| LeagueGoals {
            league: league.to_string(),
            total_goals,
        })
        .collect();
    rows.sort_by(|a, b| b.total_goals.total_cmp(&a.total_goals));
    rows
}

pub fn league_activity(records: &[MatchRecord], n: usize) -> Vec<LeagueCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for m in records.iter().filter(|m| !m.league.is_empty()) {
        *counts.entry(m.league.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<LeagueCount> = counts
        .into_iter()
        .map(|(league, matches)| LeagueCount {
            league: league.to_string(),
            matches,
        })
        .collect();
    rows.sort_by(|a, b| b.matches.cmp(&a.matches));
    rows.truncate(n);
    rows
}

/// Goals per kickoff hour. Records without a parsable `HH:MM` time are left out.
pub fn goals_by_hour(records: &[MatchRecord]) -> BTreeMap<u32, f64> {
    let mut out = BTreeMap::new();
    for m in records {
        if let Some(hour) = m.kickoff_hour() {
            *out.entry(hour).or_insert(0.0) += m.total_goals();
        }
    }
    out
}

pub fn league_hour_heatmap(records: &[MatchRecord]) -> Vec<HeatCell> {
    let mut cells: BTreeMap<(&str, u32), f64> = BTreeMap::new();
    for m in records.iter().filter(|m| !m.league.is_empty()) {
        let Some(hour) = m.kickoff_hour() else {
            continue;
        };
        *cells.entry((m.league.as_str(), hour)).or_insert(0.0) += m.total_goals();
    }
    cells
        .into_iter()
        .map(|((league, hour), total_goals)| HeatCell {
            league: league.to_string(),
            hour,
            total_goals,
        })
        .collect()
}

pub fn team_performance(records: &[MatchRecord], team: &str) -> TeamPerformance {
    let mut matches = Vec::new();
    let mut summary = TeamSummary::default();

    for m in records.iter().filter(|m| m.involves(team)) {
        let (venue, opponent, scored, conceded) = if m.home == team {
            (Venue::Home, &m.away, m.score_home, m.score_away)
        } else {
            (Venue::Away, &m.home, m.score_away, m.score_home)
        };
        let result = TeamResult::from_scores(scored, conceded);

        summary.matches += 1;
        summary.goals_scored += scored;
        summary.goals_conceded += conceded;
        match result {
            TeamResult::Win => summary.wins += 1,
            TeamResult::Draw => summary.draws += 1,
            TeamResult::Loss => summary.losses += 1,
        }

        matches.push(TeamMatch {
            date: m.date.clone(),
            time: m.time.clone(),
            league: m.league.clone(),
            opponent: opponent.clone(),
            venue,
            scored,
            conceded,
            result,
        });
    }

    TeamPerformance {
        team: team.to_string(),
        matches,
        summary,
    }
}

fn all_at_max(records: &[MatchRecord], value: impl Fn(&MatchRecord) -> f64) -> Vec<&MatchRecord> {
    let Some(max) = records.iter().map(&value).reduce(f64::max) else {
        return Vec::new();
    };
    records.iter().filter(|&m| value(m) == max).collect()
}

fn tally_teams<'a>(
    records: &'a [MatchRecord],
    sides: impl Fn(&'a MatchRecord) -> [(&'a str, f64); 2],
) -> BTreeMap<String, f64> {
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for m in records {
        for (team, goals) in sides(m) {
            if team.is_empty() {
                continue;
            }
            *out.entry(team.to_string()).or_insert(0.0) += goals;
        }
    }
    out
}

fn team_rows(goals: BTreeMap<String, f64>) -> Vec<TeamGoals> {
    goals
        .into_iter()
        .map(|(team, goals)| TeamGoals { team, goals })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
