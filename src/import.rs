//! Loading fixture snapshots (CSV or JSON) into match records.
//!
//! Provider rows are loose: ids and scores arrive as numbers or text, dates as
//! `DD/MM/YYYY` or ISO, and the rest flag as a bool or "SI". Everything is
//! normalized here so the standings engine only ever sees clean [`Match`] values.

use crate::models::{Match, MatchStatus};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

/// Time used when a row has none.
pub const DEFAULT_TIME: &str = "00:00";

/// Errors that can occur while loading a fixture snapshot.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    /// File extension is neither `.csv` nor `.json`.
    UnsupportedFormat(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "Could not read fixture: {}", e),
            ImportError::Csv(e) => write!(f, "Invalid CSV fixture: {}", e),
            ImportError::Json(e) => write!(f, "Invalid JSON fixture: {}", e),
            ImportError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported fixture format '{}' (expected csv or json)", ext)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(e) => Some(e),
            ImportError::Csv(e) => Some(e),
            ImportError::Json(e) => Some(e),
            ImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e)
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::Csv(e)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Json(e)
    }
}

/// Serialization of a fixture snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureFormat {
    Csv,
    Json,
}

impl FixtureFormat {
    /// Format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(FixtureFormat::Csv),
            "json" => Ok(FixtureFormat::Json),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// A cell that may hold a bool, a number or text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Flag(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseValue {
    fn into_text(self) -> String {
        match self {
            LooseValue::Flag(b) => b.to_string(),
            LooseValue::Int(n) => n.to_string(),
            LooseValue::Float(x) => x.to_string(),
            LooseValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Non-negative whole number, if the cell holds one.
    fn as_score(&self) -> Option<u32> {
        match self {
            LooseValue::Int(n) => u32::try_from(*n).ok(),
            LooseValue::Float(x) if *x >= 0.0 && x.fract() == 0.0 && *x <= f64::from(u32::MAX) => {
                Some(*x as u32)
            }
            LooseValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Rest flag: `true`, "SI" or "true" in any case.
    fn as_rest_flag(&self) -> bool {
        match self {
            LooseValue::Flag(b) => *b,
            LooseValue::Text(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("si") || s.eq_ignore_ascii_case("true")
            }
            _ => false,
        }
    }
}

/// One fixture row as the provider stores it (column names as in the provider table).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFixtureRow {
    /// Kept verbatim when given as text; CSV ids are always read as text.
    #[serde(default)]
    pub id: Option<LooseValue>,
    #[serde(default, alias = "competition")]
    pub tournament: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "stage_label", alias = "stageGroup")]
    pub stage_group: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, alias = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(default, alias = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(default, alias = "scoreHome")]
    pub score_home: Option<LooseValue>,
    #[serde(default, alias = "scoreAway")]
    pub score_away: Option<LooseValue>,
    #[serde(default, alias = "isRest")]
    pub is_rest: Option<LooseValue>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RawFixtureRow {
    /// Normalize into a match record. Rows without an id get a fresh one.
    pub fn into_match(self) -> Match {
        let id = self
            .id
            .map(LooseValue::into_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                let id = Uuid::new_v4().to_string();
                log::debug!("Fixture row without id, assigned {}", id);
                id
            });
        let time = self
            .time
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TIME.to_string());

        Match {
            id,
            competition: self.tournament.unwrap_or_default(),
            category: self.category.filter(|c| !c.is_empty()),
            stage_label: self.stage_group,
            date: self.date.as_deref().map(normalize_date).unwrap_or_default(),
            time,
            home_team: self.home_team.unwrap_or_default(),
            away_team: self.away_team.unwrap_or_default(),
            score_home: self.score_home.as_ref().and_then(LooseValue::as_score),
            score_away: self.score_away.as_ref().and_then(LooseValue::as_score),
            is_rest: self.is_rest.as_ref().is_some_and(LooseValue::as_rest_flag),
            status: parse_status(self.status.as_deref()),
        }
    }
}

fn parse_status(raw: Option<&str>) -> MatchStatus {
    match raw.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("live") => MatchStatus::Live,
        Some(s) if s.eq_ignore_ascii_case("finished") => MatchStatus::Finished,
        _ => MatchStatus::Scheduled,
    }
}

/// `DD/MM/YYYY` to ISO `YYYY-MM-DD`; anything else is returned trimmed.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.contains('/') {
        return raw.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return date.format("%Y-%m-%d").to_string();
    }
    // Not a calendar date (e.g. 31/02), but still make it sort like one.
    match raw.split('/').collect::<Vec<_>>().as_slice() {
        [d, m, y] => format!("{}-{:0>2}-{:0>2}", y, m, d),
        _ => raw.to_string(),
    }
}

/// Rows to matches.
pub fn rows_into_matches(rows: Vec<RawFixtureRow>) -> Vec<Match> {
    rows.into_iter().map(RawFixtureRow::into_match).collect()
}

/// Read matches from CSV with a header row. Unreadable rows are skipped with a warning.
pub fn matches_from_csv<R: Read>(reader: R) -> Result<Vec<Match>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    // Fail fast on a missing or broken header; row errors are per-row.
    let headers = rdr.headers()?.clone();
    let id_col = headers.iter().position(|h| h == "id");
    let mut matches = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let row = record
            .map_err(ImportError::from)
            .and_then(|record| {
                let mut row: RawFixtureRow = record.deserialize(Some(&headers))?;
                // Ids are opaque: keep the cell text, not the number it looks like ("007", "1e3").
                if let Some(cell) = id_col.and_then(|i| record.get(i)) {
                    row.id = Some(LooseValue::Text(cell.to_string()));
                }
                Ok(row)
            });
        match row {
            Ok(row) => matches.push(row.into_match()),
            Err(e) => log::warn!("Skipping fixture row {}: {}", line + 1, e),
        }
    }
    Ok(matches)
}

/// Read matches from a JSON array of rows.
pub fn matches_from_json(text: &str) -> Result<Vec<Match>, ImportError> {
    let rows: Vec<RawFixtureRow> = serde_json::from_str(text)?;
    Ok(rows_into_matches(rows))
}

/// Parse a snapshot already held in memory.
pub fn parse_matches(text: &str, format: FixtureFormat) -> Result<Vec<Match>, ImportError> {
    match format {
        FixtureFormat::Csv => matches_from_csv(text.as_bytes()),
        FixtureFormat::Json => matches_from_json(text),
    }
}

/// Load a snapshot from disk; the format follows the file extension.
pub fn load_matches(path: &Path) -> Result<Vec<Match>, ImportError> {
    let format = FixtureFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let matches = parse_matches(&text, format)?;
    log::info!("Loaded {} matches from {}", matches.len(), path.display());
    Ok(matches)
}

/// Keep only matches played in the given calendar year. Undated matches are dropped.
pub fn filter_season(matches: Vec<Match>, season: i32) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| {
            NaiveDate::parse_from_str(&m.date, "%Y-%m-%d")
                .map(|d| d.year() == season)
                .unwrap_or(false)
        })
        .collect()
}
