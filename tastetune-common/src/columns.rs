//! Column alias resolution
//!
//! Sheet B (taste/mood/music) accepts several header spellings per logical
//! field; the first alias present in the sheet wins. Sheet A (food/taste)
//! uses exact header names and only warns when one is missing.

use crate::table::Table;
use crate::{Error, Result};
use tracing::{debug, warn};

/// Physical column of a logical field; `None` means the field is absent
/// and every row reads as missing it
pub type ColumnRef = Option<usize>;

/// Logical fields of the taste/mood/music sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Taste,
    Mood,
    SongTitle,
    Uri,
    Artist,
    Rank,
    Weight,
    Instrumental,
}

impl TrackField {
    pub const ALL: [TrackField; 8] = [
        TrackField::Taste,
        TrackField::Mood,
        TrackField::SongTitle,
        TrackField::Uri,
        TrackField::Artist,
        TrackField::Rank,
        TrackField::Weight,
        TrackField::Instrumental,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrackField::Taste => "taste",
            TrackField::Mood => "mood",
            TrackField::SongTitle => "song_title",
            TrackField::Uri => "uri",
            TrackField::Artist => "artist",
            TrackField::Rank => "rank",
            TrackField::Weight => "weight",
            TrackField::Instrumental => "instrumental",
        }
    }

    /// Accepted header names, in priority order
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TrackField::Taste => &["taste", "味覚", "default_taste"],
            TrackField::Mood => &["mood", "気分"],
            TrackField::SongTitle => &["song_title", "song", "曲名", "title", "楽曲名"],
            TrackField::Uri => &["uri", "link", "url", "リンク", "動画", "音源", "path", "file"],
            TrackField::Artist => &["artist", "アーティスト", "歌手", "作曲者"],
            TrackField::Rank => &["rank", "順位", "優先度"],
            TrackField::Weight => &["weight", "重み", "抽選重み"],
            TrackField::Instrumental => &["instrumental", "インスト", "歌詞なし", "instrument", "inst"],
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            TrackField::Taste | TrackField::Mood | TrackField::SongTitle | TrackField::Uri
        )
    }
}

/// Find the first candidate name present in the table
///
/// Candidates are tried in the given order, not the table's column order.
/// A required field with no match is `RequiredColumnMissing`; an optional
/// one resolves to `None`.
pub fn resolve_column(
    table: &Table,
    field: &'static str,
    candidates: &[&'static str],
    required: bool,
) -> Result<ColumnRef> {
    for candidate in candidates {
        if let Some(idx) = table.column_index(candidate) {
            debug!("Column '{}' resolved to '{}' (index {})", field, candidate, idx);
            return Ok(Some(idx));
        }
    }

    if required {
        return Err(Error::RequiredColumnMissing {
            field,
            candidates: candidates.to_vec(),
        });
    }

    debug!("Optional column '{}' not present", field);
    Ok(None)
}

/// Resolved columns of the taste/mood/music sheet
#[derive(Debug, Clone, Copy)]
pub struct TrackColumns {
    pub taste: ColumnRef,
    pub mood: ColumnRef,
    pub title: ColumnRef,
    pub uri: ColumnRef,
    pub artist: ColumnRef,
    pub rank: ColumnRef,
    pub weight: ColumnRef,
    pub instrumental: ColumnRef,
}

impl TrackColumns {
    /// Resolve every logical field once for the whole table
    pub fn resolve(table: &Table) -> Result<Self> {
        let resolve = |field: TrackField| {
            resolve_column(table, field.name(), field.aliases(), field.is_required())
        };

        Ok(Self {
            taste: resolve(TrackField::Taste)?,
            mood: resolve(TrackField::Mood)?,
            title: resolve(TrackField::SongTitle)?,
            uri: resolve(TrackField::Uri)?,
            artist: resolve(TrackField::Artist)?,
            rank: resolve(TrackField::Rank)?,
            weight: resolve(TrackField::Weight)?,
            instrumental: resolve(TrackField::Instrumental)?,
        })
    }
}

/// Columns of the food/taste sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodField {
    FoodId,
    FoodName,
    DefaultTaste,
    AllowChoice,
    OptionTaste,
}

impl FoodField {
    pub fn name(self) -> &'static str {
        match self {
            FoodField::FoodId => "food_id",
            FoodField::FoodName => "food_name",
            FoodField::DefaultTaste => "default_taste",
            FoodField::AllowChoice => "allow_choice",
            FoodField::OptionTaste => "option_taste",
        }
    }
}

/// Resolved columns of the food/taste sheet, plus the ones that were missing
#[derive(Debug, Clone)]
pub struct FoodColumns {
    pub food_id: ColumnRef,
    pub food_name: ColumnRef,
    pub default_taste: ColumnRef,
    pub allow_choice: ColumnRef,
    pub option_taste: ColumnRef,
    pub missing: Vec<FoodField>,
}

impl FoodColumns {
    /// Exact-name lookup; a missing column is a warning and reads as always empty
    pub fn resolve(table: &Table) -> Self {
        let mut missing = Vec::new();
        let mut lookup = |field: FoodField| {
            let column = table.column_index(field.name());
            if column.is_none() {
                warn!(
                    "Food sheet has no '{}' column (check case, full-width characters \
                     and spaces); treating it as empty",
                    field.name()
                );
                missing.push(field);
            }
            column
        };

        let food_id = lookup(FoodField::FoodId);
        let food_name = lookup(FoodField::FoodName);
        let default_taste = lookup(FoodField::DefaultTaste);
        let allow_choice = lookup(FoodField::AllowChoice);
        let option_taste = lookup(FoodField::OptionTaste);

        Self {
            food_id,
            food_name,
            default_taste,
            allow_choice,
            option_taste,
            missing,
        }
    }
}
