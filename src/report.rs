use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::{
    self, GoalBucket, HeatCell, LeagueCount, LeagueFilter, LeagueGoals, MatchFacts, OutcomeSplit,
    OverUnder, SummaryKpis, TeamGoals, TeamPerformance,
};
use crate::clean::{self, CleanStats};
use crate::record::{EnrichedMatch, MatchRecord, RawRow};

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_OVER_UNDER_LINE: f64 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub league: LeagueFilter,
    pub team: Option<String>,
    pub top_n: usize,
    pub over_under_line: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            league: LeagueFilter::All,
            team: None,
            top_n: DEFAULT_TOP_N,
            over_under_line: DEFAULT_OVER_UNDER_LINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub league: String,
    pub leagues: Vec<String>,
    pub teams: Vec<String>,
    pub summary: SummaryKpis,
    pub outcomes: OutcomeSplit,
    pub facts: MatchFacts,
    pub over_under: OverUnder,
    pub top_scoring: Vec<EnrichedMatch>,
    pub biggest_margins: Vec<EnrichedMatch>,
    pub top_attacking: Vec<TeamGoals>,
    pub top_defensive: Vec<TeamGoals>,
    pub goal_distribution: Vec<GoalBucket>,
    pub goals_by_hour: BTreeMap<u32, f64>,
    pub goals_by_league: Vec<LeagueGoals>,
    pub league_activity: Vec<LeagueCount>,
    pub league_hour_heatmap: Vec<HeatCell>,
    pub outcomes_by_league: BTreeMap<String, OutcomeSplit>,
    pub team: Option<TeamPerformance>,
    pub matches: Vec<EnrichedMatch>,
}

impl Report {
    /// Builds every view from one cleaned table.
    ///
    /// League comparison views (`goals_by_league`, `league_activity`,
    /// `league_hour_heatmap`) always span every league; the rest honour the
    /// league filter.
    pub fn build(records: &[MatchRecord], options: &ReportOptions) -> Self {
        let scoped = aggregate::filter_league(records, &options.league);

        let team = options
            .team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| aggregate::team_performance(&scoped, t));

        Self {
            league: options.league.label().to_string(),
            leagues: aggregate::leagues(records),
            teams: aggregate::teams(&scoped),
            summary: aggregate::summary_kpis(&scoped),
            outcomes: aggregate::outcome_split(&scoped),
            facts: aggregate::match_facts(&scoped),
            over_under: aggregate::over_under(&scoped, options.over_under_line),
            top_scoring: aggregate::top_scoring_matches(&scoped)
                .into_iter()
                .map(EnrichedMatch::new)
                .collect(),
            biggest_margins: aggregate::biggest_margins(&scoped)
                .into_iter()
                .map(EnrichedMatch::new)
                .collect(),
            top_attacking: aggregate::top_attacking_teams(&scoped, options.top_n),
            top_defensive: aggregate::top_defensive_teams(&scoped, options.top_n),
            goal_distribution: aggregate::goal_distribution(&scoped),
            goals_by_hour: aggregate::goals_by_hour(&scoped),
            goals_by_league: aggregate::goals_by_league(records),
            league_activity: aggregate::league_activity(records, options.top_n),
            league_hour_heatmap: aggregate::league_hour_heatmap(records),
            outcomes_by_league: aggregate::outcomes_by_league(&scoped),
            team,
            matches: aggregate::enrich(&scoped),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub records: Vec<MatchRecord>,
    pub clean: CleanStats,
    pub report: Report,
    pub logs: Vec<String>,
}

impl PipelineRun {
    fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push(msg.into());
    }
}

/// Raw rows in, cleaned table plus report out, with a log of what was filtered.
pub fn run_pipeline(rows: &[RawRow], options: &ReportOptions) -> PipelineRun {
    let (records, stats) = clean::clean_with_stats(rows);
    let report = Report::build(&records, options);
    let unparsed = report
        .matches
        .iter()
        .filter(|m| m.record.kickoff_hour().is_none())
        .count();

    let mut run = PipelineRun {
        records,
        clean: stats,
        report,
        logs: Vec::new(),
    };

    run.push_log(format!("[INFO] Loaded {} rows", stats.total));
    run.push_log(format!(
        "[INFO] Kept {} rows ({} missing score, {} non-numeric score)",
        stats.kept, stats.dropped_missing, stats.dropped_invalid
    ));
    if stats.total > 0 && stats.kept == 0 {
        run.push_log("[WARN] No rows with usable scores");
    }
    if let LeagueFilter::Named(name) = &options.league {
        let matches = run.report.summary.matches;
        if matches == 0 {
            run.push_log(format!("[WARN] League filter '{name}' matched no rows"));
        } else {
            run.push_log(format!("[INFO] League filter '{name}': {matches} rows"));
        }
    }
    if unparsed > 0 {
        run.push_log(format!(
            "[INFO] {unparsed} rows without HH:MM kickoff left out of hourly views"
        ));
    }
    if let Some(team) = &run.report.team
        && team.matches.is_empty()
    {
        let msg = format!("[WARN] Team '{}' has no matches in scope", team.team);
        run.push_log(msg);
    }
    run
}
