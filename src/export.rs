use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{HeatCell, LeagueCount, LeagueGoals, OutcomeSplit, TeamGoals};
use crate::record::{EnrichedMatch, format_goals};
use crate::report::Report;

pub struct ExportSummary {
    pub matches: usize,
    pub teams: usize,
    pub leagues: usize,
    pub hours: usize,
    pub heatmap_cells: usize,
}

pub fn report_to_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

pub fn export_report_xlsx(path: &Path, report: &Report) -> Result<ExportSummary> {
    let mut match_rows = vec![header(&[
        "Date",
        "Time",
        "League",
        "Home",
        "Away",
        "Home Goals",
        "Away Goals",
        "Total Goals",
        "Goal Diff",
        "Result",
    ])];
    match_rows.extend(report.matches.iter().map(match_row));

    let summary_rows = summary_rows(report);

    let mut team_rows = vec![header(&["Ranking", "Rank", "Team", "Goals"])];
    team_rows.extend(ranking_rows("Top Attacking", &report.top_attacking));
    team_rows.extend(ranking_rows("Top Defensive", &report.top_defensive));

    let mut league_rows = vec![header(&["View", "League", "Value"])];
    league_rows.extend(report.goals_by_league.iter().map(league_goals_row));
    league_rows.extend(report.league_activity.iter().map(league_activity_row));

    let mut hour_rows = vec![header(&["Hour", "Total Goals"])];
    hour_rows.extend(
        report
            .goals_by_hour
            .iter()
            .map(|(hour, goals)| vec![format!("{hour:02}"), format_goals(*goals)]),
    );

    let mut heat_rows = vec![header(&["League", "Hour", "Total Goals"])];
    heat_rows.extend(report.league_hour_heatmap.iter().map(heat_row));

    let mut outcome_rows = vec![header(&["League", "Home Wins", "Away Wins", "Draws"])];
    outcome_rows.extend(
        report
            .outcomes_by_league
            .iter()
            .map(|(league, split)| outcome_row(league, split)),
    );

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &match_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Teams")?;
        write_rows(sheet, &team_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Leagues")?;
        write_rows(sheet, &league_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Hours")?;
        write_rows(sheet, &hour_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Heatmap")?;
        write_rows(sheet, &heat_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Outcomes")?;
        write_rows(sheet, &outcome_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportSummary {
        matches: match_rows.len().saturating_sub(1),
        teams: team_rows.len().saturating_sub(1),
        leagues: league_rows.len().saturating_sub(1),
        hours: hour_rows.len().saturating_sub(1),
        heatmap_cells: heat_rows.len().saturating_sub(1),
    })
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn match_row(m: &EnrichedMatch) -> Vec<String> {
    vec![
        m.record.date.clone(),
        opt_to_string(m.record.time.as_deref()),
        m.record.league.clone(),
        m.record.home.clone(),
        m.record.away.clone(),
        format_goals(m.record.score_home),
        format_goals(m.record.score_away),
        format_goals(m.total_goals),
        format_goals(m.goal_diff),
        m.outcome.label().to_string(),
    ]
}

fn summary_rows(report: &Report) -> Vec<Vec<String>> {
    let pair = |k: &str, v: String| vec![k.to_string(), v];
    let mut rows = vec![
        header(&["Metric", "Value"]),
        pair("League", report.league.clone()),
        pair("Matches", report.summary.matches.to_string()),
        pair("Goals", format_goals(report.summary.goals)),
        pair("Avg Goals", format!("{:.2}", report.summary.avg_goals)),
        pair("Draws", report.summary.draws.to_string()),
        pair("Home Wins", report.outcomes.home_wins.to_string()),
        pair("Away Wins", report.outcomes.away_wins.to_string()),
        pair("Clean Sheets", report.facts.clean_sheets.to_string()),
        pair("Goalless Draws", report.facts.goalless_draws.to_string()),
        pair(
            format!("Over {}", report.over_under.line).as_str(),
            report.over_under.over.to_string(),
        ),
        pair(
            format!("Under {}", report.over_under.line).as_str(),
            report.over_under.under.to_string(),
        ),
    ];
    if let Some(team) = &report.team {
        let s = &team.summary;
        rows.push(pair("Team", team.team.clone()));
        rows.push(pair("Team Matches", s.matches.to_string()));
        rows.push(pair("Team Goals Scored", format_goals(s.goals_scored)));
        rows.push(pair("Team Goals Conceded", format_goals(s.goals_conceded)));
        rows.push(pair("Team Wins", s.wins.to_string()));
        rows.push(pair("Team Draws", s.draws.to_string()));
        rows.push(pair("Team Losses", s.losses.to_string()));
    }
    rows
}

fn ranking_rows(label: &str, rows: &[TeamGoals]) -> Vec<Vec<String>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            vec![
                label.to_string(),
                (idx + 1).to_string(),
                row.team.clone(),
                format_goals(row.goals),
            ]
        })
        .collect()
}

fn league_goals_row(row: &LeagueGoals) -> Vec<String> {
    vec![
        "Total Goals".to_string(),
        row.league.clone(),
        format_goals(row.total_goals),
    ]
}

fn league_activity_row(row: &LeagueCount) -> Vec<String> {
    vec![
        "Matches".to_string(),
        row.league.clone(),
        row.matches.to_string(),
    ]
}

fn heat_row(cell: &HeatCell) -> Vec<String> {
    vec![
        cell.league.clone(),
        format!("{:02}", cell.hour),
        format_goals(cell.total_goals),
    ]
}

fn outcome_row(league: &str, split: &OutcomeSplit) -> Vec<String> {
    vec![
        league.to_string(),
        split.home_wins.to_string(),
        split.away_wins.to_string(),
        split.draws.to_string(),
    ]
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
