//! Track records and extraction from the taste/mood/music sheet

use crate::columns::TrackColumns;
use crate::table::{CellValue, Table};
use crate::vocab::{coerce_boolean, normalize_mood, normalize_taste, Mood, Taste};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selection weight used when a row supplies none
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Ranks at or beyond this magnitude do not fit an `i64` and read as absent
const RANK_LIMIT: f64 = 9.2e18;

/// One playable item
///
/// Absent optional fields are omitted from the document, never emitted as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrumental: Option<bool>,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Track {
    /// Minimal track with default weight and no optional fields
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
            artist: None,
            rank: None,
            weight: DEFAULT_WEIGHT,
            instrumental: None,
        }
    }
}

/// A surviving sheet row: the track plus the pair it is filed under
#[derive(Debug, Clone)]
pub struct TrackRow {
    pub taste: Taste,
    pub mood: Mood,
    /// Untruncated rank, used as the sort key
    pub rank_key: Option<f64>,
    pub track: Track,
}

/// Extract one `TrackRow` per valid row, in source order
///
/// Columns are resolved once for the whole table; a missing required column
/// aborts. Rows with an empty taste, mood, title or uri are dropped.
pub fn extract_tracks(table: &Table) -> Result<Vec<TrackRow>> {
    let columns = TrackColumns::resolve(table)?;

    let extracted: Vec<TrackRow> = table
        .rows()
        .filter_map(|row| {
            let taste = normalize_taste(row.get(columns.taste))?;
            let mood = normalize_mood(row.get(columns.mood))?;
            let title = row.get(columns.title).trimmed_text()?;
            let uri = row.get(columns.uri).trimmed_text()?;

            let rank_key = parse_rank(row.get(columns.rank));
            let track = Track {
                title,
                uri,
                artist: parse_artist(row.get(columns.artist)),
                rank: rank_key.map(|r| r.trunc() as i64),
                weight: row.get(columns.weight).as_number().unwrap_or(DEFAULT_WEIGHT),
                instrumental: coerce_boolean(row.get(columns.instrumental)),
            };

            Some(TrackRow {
                taste,
                mood,
                rank_key,
                track,
            })
        })
        .collect();

    debug!(
        "Extracted {} of {} music rows",
        extracted.len(),
        table.row_count()
    );
    Ok(extracted)
}

fn parse_rank(cell: &CellValue) -> Option<f64> {
    cell.as_number().filter(|rank| rank.abs() < RANK_LIMIT)
}

/// Trimmed artist; blank values and the `nan` marker read as absent
fn parse_artist(cell: &CellValue) -> Option<String> {
    cell.trimmed_text()
        .filter(|artist| !artist.eq_ignore_ascii_case("nan"))
}
