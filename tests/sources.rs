use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use fixture_stats::aggregate::goals_by_hour;
use fixture_stats::clean;
use fixture_stats::source::{
    load_rows, parse_api_fixtures_json, parse_json_source, parse_rows_json, read_rows_csv,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

#[test]
fn parses_json_rows_fixture() {
    let rows = parse_rows_json(&read_fixture("rows.json")).expect("fixture should parse");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1].score_home, Value::String("1".to_string()));
    assert_eq!(rows[2].score_home, Value::Null);
    assert_eq!(rows[3].time, None);

    let records = clean(&rows);
    assert_eq!(records.len(), 3);
    let hourly = goals_by_hour(&records);
    assert_eq!(hourly.len(), 2);
    assert_eq!(hourly[&15], 3.0);
    assert_eq!(hourly[&18], 6.0);
}

#[test]
fn parses_api_fixtures_fixture() {
    let rows = parse_api_fixtures_json(&read_fixture("api_fixtures.json"))
        .expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date.as_deref(), Some("2025-05-04"));
    assert_eq!(rows[0].time.as_deref(), Some("13:00"));
    assert_eq!(rows[0].league.as_deref(), Some("Premier League"));
    assert_eq!(rows[1].home.as_deref(), Some("Barcelona"));
    assert_eq!(rows[1].away.as_deref(), Some("Real Madrid"));

    // Not-started fixtures have null goals and fall out during cleaning.
    let records = clean(&rows);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].total_goals(), 7.0);
    assert_eq!(records[1].kickoff_hour(), Some(19));
}

#[test]
fn json_source_detects_api_bodies() {
    let api = parse_json_source(&read_fixture("api_fixtures.json")).expect("api body");
    assert_eq!(api.len(), 3);
    let rows = parse_json_source(&read_fixture("rows.json")).expect("row array");
    assert_eq!(rows.len(), 4);
}

#[test]
fn null_bodies_are_empty() {
    assert!(parse_rows_json("null").expect("null should parse").is_empty());
    assert!(parse_rows_json("  ").expect("blank should parse").is_empty());
    assert!(
        parse_api_fixtures_json("null")
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_api_fixtures_json(r#"{"response": []}"#)
            .expect("empty response should parse")
            .is_empty()
    );
}

#[test]
fn broken_json_is_an_error() {
    assert!(parse_rows_json("[{").is_err());
    assert!(parse_api_fixtures_json("{").is_err());
}

#[test]
fn load_rows_dispatches_on_extension() {
    let csv = load_rows(&fixture_path("matchday.csv")).expect("csv should load");
    assert_eq!(csv.len(), 8);
    let json = load_rows(&fixture_path("rows.json")).expect("json should load");
    assert_eq!(json.len(), 4);
    assert!(load_rows(&fixture_path("missing.csv")).is_err());
}

#[test]
fn csv_header_order_does_not_matter() {
    let raw = "score_away,away,score_home,home,league\n1,B,3,A,Cup\n";
    let rows = read_rows_csv(raw.as_bytes()).expect("csv should parse");
    let records = clean(&rows);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].home, "A");
    assert_eq!(records[0].away, "B");
    assert_eq!(records[0].score_home, 3.0);
    assert_eq!(records[0].score_away, 1.0);
    assert_eq!(records[0].date, "");
}
