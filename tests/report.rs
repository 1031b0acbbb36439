use std::path::PathBuf;

use fixture_stats::aggregate::LeagueFilter;
use fixture_stats::export::{export_report_xlsx, report_to_json};
use fixture_stats::report::{Report, ReportOptions, run_pipeline};
use fixture_stats::sample::generate_sample_rows;
use fixture_stats::source::load_rows;
use fixture_stats::{RawRow, clean};

fn fixture_rows() -> Vec<RawRow> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("matchday.csv");
    load_rows(&path).expect("fixture should load")
}

#[test]
fn full_report_over_all_leagues() {
    let run = run_pipeline(&fixture_rows(), &ReportOptions::default());
    let report = &run.report;
    assert_eq!(run.clean.kept, 6);
    assert_eq!(run.records.len(), 6);
    assert_eq!(report.league, "All Leagues");
    assert_eq!(report.summary.matches, 6);
    assert_eq!(report.matches.len(), 6);
    assert_eq!(report.top_scoring.len(), 4);
    assert_eq!(report.biggest_margins.len(), 1);
    assert_eq!(report.top_attacking.len(), 5);
    assert_eq!(report.over_under.over, 4);
    assert_eq!(report.over_under.under, 2);
    assert!(report.team.is_none());

    assert_eq!(run.logs.len(), 3);
    assert_eq!(run.logs[0], "[INFO] Loaded 8 rows");
    assert!(
        run.logs
            .iter()
            .any(|l| l.contains("2 rows without HH:MM kickoff"))
    );
}

#[test]
fn league_views_ignore_the_filter() {
    let options = ReportOptions {
        league: LeagueFilter::Named("La Liga".to_string()),
        team: Some("Getafe".to_string()),
        ..ReportOptions::default()
    };
    let run = run_pipeline(&fixture_rows(), &options);
    let report = &run.report;

    assert_eq!(report.league, "La Liga");
    assert_eq!(report.summary.matches, 2);
    assert_eq!(report.outcomes_by_league.len(), 1);
    assert_eq!(report.goals_by_league.len(), 3);
    assert_eq!(report.league_activity.len(), 3);
    assert_eq!(report.leagues.len(), 3);
    assert_eq!(report.teams, vec!["Getafe", "Sevilla", "Villarreal"]);

    let team = report.team.as_ref().expect("team view requested");
    assert_eq!(team.summary.matches, 2);
    assert_eq!(team.summary.losses, 2);
    assert_eq!(team.summary.goals_scored, 1.0);
    assert_eq!(team.summary.goals_conceded, 7.0);

    assert!(
        run.logs
            .iter()
            .any(|l| l == "[INFO] League filter 'La Liga': 2 rows")
    );
}

#[test]
fn unknown_league_yields_zeroed_report() {
    let options = ReportOptions {
        league: LeagueFilter::Named("Eredivisie".to_string()),
        ..ReportOptions::default()
    };
    let run = run_pipeline(&fixture_rows(), &options);
    assert_eq!(run.report.summary.matches, 0);
    assert_eq!(run.report.summary.avg_goals, 0.0);
    assert!(run.report.top_scoring.is_empty());
    assert!(run.report.goal_distribution.is_empty());
    assert!(run.logs.iter().any(|l| l.starts_with("[WARN] League filter")));
}

#[test]
fn empty_input_builds_empty_report() {
    let report = Report::build(&[], &ReportOptions::default());
    assert_eq!(report.summary.matches, 0);
    assert_eq!(report.summary.goals, 0.0);
    assert_eq!(report.summary.avg_goals, 0.0);
    assert!(report.matches.is_empty());
    assert!(report.goals_by_hour.is_empty());
    assert!(report.league_hour_heatmap.is_empty());

    let run = run_pipeline(&[], &ReportOptions::default());
    assert_eq!(run.clean.total, 0);
    assert!(!run.logs.iter().any(|l| l.starts_with("[WARN]")));
}

#[test]
fn report_serializes_to_json() {
    let records = clean(&fixture_rows());
    let report = Report::build(&records, &ReportOptions::default());
    let json = report_to_json(&report).expect("report should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["matches"], 6);
    assert_eq!(value["outcomes"]["home_wins"], 3);
    assert_eq!(value["goals_by_hour"]["12"], 4.0);
    assert_eq!(value["matches"][0]["home"], "Arsenal");
    assert_eq!(value["matches"][0]["outcome"], "HomeWin");
    assert_eq!(value["matches"][0]["total_goals"], 4.0);
}

#[test]
fn sample_rows_survive_the_pipeline() {
    let rows = generate_sample_rows(500, 42);
    let run = run_pipeline(&rows, &ReportOptions::default());
    assert_eq!(run.clean.total, 500);
    assert!(run.clean.dropped() > 0);
    assert!(run.clean.kept > 400);
    assert_eq!(run.report.outcomes.total(), run.clean.kept);
    assert!(run.report.goals_by_hour.len() <= 24);
}

#[test]
fn writes_xlsx_workbook() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("report.xlsx");
    let options = ReportOptions {
        team: Some("Arsenal".to_string()),
        ..ReportOptions::default()
    };
    let run = run_pipeline(&fixture_rows(), &options);
    let summary = export_report_xlsx(&path, &run.report).expect("workbook should save");
    assert_eq!(summary.matches, 6);
    assert_eq!(summary.teams, 10);
    assert_eq!(summary.leagues, 6);
    assert_eq!(summary.hours, 4);
    assert_eq!(summary.heatmap_cells, 4);
    assert!(path.exists());
}
