use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::record::RawRow;

const COLUMNS: [&str; 7] = [
    "date",
    "time",
    "league",
    "home",
    "away",
    "score_home",
    "score_away",
];

/// Loads raw rows from a file. `.csv` files are read as CSV, anything else as
/// JSON (either a row array or a fixtures API response body).
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return load_rows_csv(path);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read fixtures file {}", path.display()))?;
    parse_json_source(&raw).with_context(|| format!("parse fixtures file {}", path.display()))
}

pub fn load_rows_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = fs::File::open(path)
        .with_context(|| format!("open fixtures csv {}", path.display()))?;
    read_rows_csv(file).with_context(|| format!("parse fixtures csv {}", path.display()))
}

/// Columns are matched by header name; unknown columns are ignored and
/// missing ones read as empty.
pub fn read_rows_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("read csv header")?.clone();
    let mut index: [Option<usize>; 7] = [None; 7];
    for (pos, header) in headers.iter().enumerate() {
        let name = header.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
        if let Some(slot) = COLUMNS.iter().position(|col| *col == name)
            && index[slot].is_none()
        {
            index[slot] = Some(pos);
        }
    }

    let mut out = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read csv record {}", line + 1))?;
        let cell = |slot: usize| index[slot].and_then(|pos| record.get(pos));
        out.push(RawRow {
            date: cell(0).and_then(text_cell),
            time: cell(1).and_then(text_cell),
            league: cell(2).and_then(text_cell),
            home: cell(3).and_then(text_cell),
            away: cell(4).and_then(text_cell),
            score_home: cell(5).map(score_cell).unwrap_or(Value::Null),
            score_away: cell(6).map(score_cell).unwrap_or(Value::Null),
        });
    }
    Ok(out)
}

/// A JSON array of row objects. Non-object entries are skipped.
pub fn parse_rows_json(raw: &str) -> Result<Vec<RawRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixture rows json")?;
    rows_from_array(&root)
}

/// Maps a fixtures API response body into raw rows.
///
/// Kickoff date and time are cut from the ISO timestamp (`date[..10]`,
/// `date[11..16]`). Unplayed fixtures carry null goals and are dropped later
/// by the cleaner.
pub fn parse_api_fixtures_json(raw: &str) -> Result<Vec<RawRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures response json")?;
    Ok(rows_from_api_response(&root))
}

pub fn parse_json_source(raw: &str) -> Result<Vec<RawRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    if root.get("response").is_some() {
        Ok(rows_from_api_response(&root))
    } else {
        rows_from_array(&root)
    }
}

fn rows_from_array(root: &Value) -> Result<Vec<RawRow>> {
    let items = root
        .as_array()
        .context("expected a json array of fixture rows")?;
    Ok(items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<RawRow>(item.clone()).ok())
        .collect())
}

fn rows_from_api_response(root: &Value) -> Vec<RawRow> {
    let Some(items) = root.get("response").and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    items.iter().filter_map(parse_api_fixture).collect()
}

fn parse_api_fixture(v: &Value) -> Option<RawRow> {
    let fixture = v.get("fixture")?;
    let kickoff = fixture.get("date").and_then(|x| x.as_str()).unwrap_or_default();
    let teams = v.get("teams");
    let goals = v.get("goals");

    Some(RawRow {
        date: kickoff.get(..10).map(|s| s.to_string()),
        time: kickoff.get(11..16).map(|s| s.to_string()),
        league: pick_str(v.get("league"), "name"),
        home: pick_str(teams.and_then(|t| t.get("home")), "name"),
        away: pick_str(teams.and_then(|t| t.get("away")), "name"),
        score_home: goals
            .and_then(|g| g.get("home"))
            .cloned()
            .unwrap_or(Value::Null),
        score_away: goals
            .and_then(|g| g.get("away"))
            .cloned()
            .unwrap_or(Value::Null),
    })
}

fn pick_str(v: Option<&Value>, key: &str) -> Option<String> {
    v?.get(key)?.as_str().map(|s| s.to_string())
}

fn text_cell(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

// CSV cells are always text; the cleaner decides whether they are numbers.
fn score_cell(raw: &str) -> Value {
    if raw.trim().is_empty() {
        Value::Null
    } else {
        Value::String(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_by_name() {
        let raw = "home,away,score_home,score_away,extra\nA,B,2,,x\nC,D,1,1\n";
        let rows = read_rows_csv(raw.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].home.as_deref(), Some("A"));
        assert_eq!(rows[0].score_home, Value::String("2".to_string()));
        assert_eq!(rows[0].score_away, Value::Null);
        assert_eq!(rows[0].league, None);
        assert_eq!(rows[1].score_away, Value::String("1".to_string()));
    }

    #[test]
    fn api_fixture_without_block_is_skipped() {
        let raw = r#"{"response":[{"league":{"name":"X"}},{"fixture":{"date":"2025-01-02T20:00:00+00:00"},"goals":{"home":1,"away":null}}]}"#;
        let rows = parse_api_fixtures_json(raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.as_deref(), Some("2025-01-02"));
        assert_eq!(rows[0].time.as_deref(), Some("20:00"));
        assert_eq!(rows[0].home, None);
        assert_eq!(rows[0].score_away, Value::Null);
    }

    #[test]
    fn short_timestamp_has_no_time() {
        let raw = r#"{"response":[{"fixture":{"date":"2025-01-02"}}]}"#;
        let rows = parse_api_fixtures_json(raw).unwrap();
        assert_eq!(rows[0].date.as_deref(), Some("2025-01-02"));
        assert_eq!(rows[0].time, None);
    }

    #[test]
    fn json_rows_must_be_an_array() {
        assert!(parse_rows_json(r#"{"home":"A"}"#).is_err());
        assert!(parse_rows_json("null").unwrap().is_empty());
        let rows = parse_rows_json(r#"[1, {"home":"A","score_home":1}]"#).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
