use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{Dataset, PlayerRecord};

/// Cell text the source uses for "no statistic recorded".
pub const MISSING_SENTINEL: &str = "No stats";

/// Column holding the player identity.
pub const PLAYER_COLUMN: &str = "Player_Name";

/// Column holding the season year. Rows without it are dropped.
pub const YEAR_COLUMN: &str = "Year";

/// The nullable numeric statistic columns, in schema order.
pub const STAT_COLUMNS: [&str; 10] = [
    "Runs_Scored",
    "Batting_Average",
    "Batting_Strike_Rate",
    "Centuries",
    "Half_Centuries",
    "Fours",
    "Sixes",
    "Wickets_Taken",
    "Economy_Rate",
    "Bowling_Average",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal schema problem: the table lacks a column needed to identify records.
/// Per-cell parse problems never raise this; they degrade to absent values.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("source table has no '{0}' column")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the schema columns (primary format)
/// * `.json` – records-oriented array of objects with the same column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Preparation: raw text rows → typed Dataset
// ---------------------------------------------------------------------------

/// A raw row as it comes off the wire: column name → cell text.
/// JSON numbers are rendered to text so both loaders share one cleaning path.
pub type RawRow = BTreeMap<String, String>;

/// Clean raw rows into an immutable [`Dataset`].
///
/// * The `"No stats"` sentinel and unparsable numeric cells become absent
///   values, per cell, without aborting the row or the load.
/// * Rows whose `Year` is absent after cleaning are dropped.
///
/// Fails only when `columns` lacks `Player_Name` or `Year` entirely.
pub fn prepare(columns: &[String], rows: &[RawRow]) -> Result<Dataset, SchemaError> {
    if !columns.iter().any(|c| c == PLAYER_COLUMN) {
        return Err(SchemaError::MissingColumn(PLAYER_COLUMN));
    }
    if !columns.iter().any(|c| c == YEAR_COLUMN) {
        return Err(SchemaError::MissingColumn(YEAR_COLUMN));
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut parse_failures = 0usize;
    let mut dropped_rows = 0usize;

    for row in rows {
        let year = match parse_cell(row.get(YEAR_COLUMN), &mut parse_failures) {
            Some(y) => y.round() as i32,
            None => {
                dropped_rows += 1;
                continue;
            }
        };
        let player_name = row
            .get(PLAYER_COLUMN)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut rec = PlayerRecord::empty(player_name, year);
        let mut stat = |col: &str| parse_cell(row.get(col), &mut parse_failures);
        rec.runs_scored = stat("Runs_Scored");
        rec.batting_average = stat("Batting_Average");
        rec.batting_strike_rate = stat("Batting_Strike_Rate");
        rec.centuries = stat("Centuries");
        rec.half_centuries = stat("Half_Centuries");
        rec.fours = stat("Fours");
        rec.sixes = stat("Sixes");
        rec.wickets_taken = stat("Wickets_Taken");
        rec.economy_rate = stat("Economy_Rate");
        rec.bowling_average = stat("Bowling_Average");

        records.push(rec);
    }

    if parse_failures > 0 {
        log::warn!("{parse_failures} numeric cells failed to parse and were treated as absent");
    }
    if dropped_rows > 0 {
        log::info!("dropped {dropped_rows} rows without a usable '{YEAR_COLUMN}' value");
    }

    Ok(Dataset::from_records(records))
}

/// Parse one numeric cell. Empty text and the missing-value sentinel are
/// absent by definition; anything else that fails to parse counts as a
/// per-cell failure and also becomes absent.
fn parse_cell(raw: Option<&String>, failures: &mut usize) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() || text == MISSING_SENTINEL {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            *failures += 1;
            None
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    prepare(&columns, &rows).context("preparing CSV data")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Player_Name": "V Kohli", "Year": 2021, "Runs_Scored": 964, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let objects = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(objects.len());

    for (i, value) in objects.iter().enumerate() {
        let obj = value
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            row.insert(key.clone(), json_to_text(val));
        }
        rows.push(row);
    }

    prepare(&columns, &rows).context("preparing JSON data")
}

/// Render a JSON value to cell text so it goes through the same cleaning
/// path as CSV cells. `null` becomes empty text, i.e. absent.
fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Process-wide load-once cache, keyed by source path and modification time.
/// A changed file on disk invalidates the entry on the next lookup.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, reloading if the file changed
    /// (or if its modification time cannot be read).
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok();

        if let Some(entry) = &self.entry {
            if entry.path == path && entry.modified.is_some() && entry.modified == modified {
                log::debug!("dataset cache hit for {}", path.display());
                return Ok(entry.dataset.clone());
            }
        }

        let dataset = Arc::new(load_file(path)?);
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            modified,
            dataset: dataset.clone(),
        });
        Ok(dataset)
    }

    /// Drop the cached entry so the next lookup reloads from disk.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        let mut cols = vec![PLAYER_COLUMN.to_string(), YEAR_COLUMN.to_string()];
        cols.extend(STAT_COLUMNS.iter().map(|c| c.to_string()));
        cols
    }

    fn row(player: &str, cells: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::new();
        row.insert(PLAYER_COLUMN.to_string(), player.to_string());
        for (col, val) in cells {
            row.insert(col.to_string(), val.to_string());
        }
        row
    }

    #[test]
    fn sentinel_cells_become_absent_not_zero() {
        let rows = vec![row(
            "A",
            &[("Year", "2020"), ("Runs_Scored", MISSING_SENTINEL)],
        )];
        let ds = prepare(&columns(), &rows).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].runs_scored, None);
    }

    #[test]
    fn unparsable_cells_become_absent_without_aborting_the_row() {
        let rows = vec![row(
            "A",
            &[
                ("Year", "2020"),
                ("Runs_Scored", "not-a-number"),
                ("Wickets_Taken", "3"),
            ],
        )];
        let ds = prepare(&columns(), &rows).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].runs_scored, None);
        assert_eq!(ds.records[0].wickets_taken, Some(3.0));
    }

    #[test]
    fn rows_without_a_year_are_dropped() {
        let rows = vec![
            row("A", &[("Year", "2020"), ("Runs_Scored", "50")]),
            row("B", &[("Year", MISSING_SENTINEL)]),
            row("C", &[("Year", "")]),
        ];
        let ds = prepare(&columns(), &rows).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].player_name, "A");
    }

    #[test]
    fn integer_like_years_are_accepted() {
        // pandas-style export renders integers as floats
        let rows = vec![row("A", &[("Year", "2020.0")])];
        let ds = prepare(&columns(), &rows).unwrap();
        assert_eq!(ds.records[0].year, 2020);
    }

    #[test]
    fn missing_identity_columns_are_a_schema_error() {
        let cols = vec!["Something_Else".to_string()];
        let err = prepare(&cols, &[]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn("Player_Name")));

        let cols = vec![PLAYER_COLUMN.to_string()];
        let err = prepare(&cols, &[]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn("Year")));
    }

    #[test]
    fn json_values_round_trip_through_cell_text() {
        assert_eq!(json_to_text(&JsonValue::Null), "");
        assert_eq!(json_to_text(&serde_json::json!(2021)), "2021");
        assert_eq!(json_to_text(&serde_json::json!("No stats")), "No stats");
        assert_eq!(json_to_text(&serde_json::json!(55.5)), "55.5");
    }
}
