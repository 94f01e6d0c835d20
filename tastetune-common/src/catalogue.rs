//! Food catalogue: one entry per distinct food name
//!
//! Built in two phases. Sheet A rows are folded into entries (first-seen
//! order, options accumulated across repeat rows), then every entry's
//! `music` is filled from the track index using its default taste only.

use crate::columns::{FoodColumns, FoodField};
use crate::index::TrackIndex;
use crate::table::Table;
use crate::tracks::Track;
use crate::vocab::{coerce_boolean, normalize_taste, Mood, Taste};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Per-mood track lists; always exactly the four canonical moods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodTracks {
    #[serde(default)]
    pub relaxation: Vec<Track>,
    #[serde(default)]
    pub excitement: Vec<Track>,
    #[serde(default)]
    pub focus: Vec<Track>,
    #[serde(default)]
    pub calm: Vec<Track>,
}

impl MoodTracks {
    /// Tracks for a mood; pass-through moods have no slot
    pub fn get(&self, mood: &Mood) -> &[Track] {
        match mood {
            Mood::Relaxation => self.relaxation.as_slice(),
            Mood::Excitement => self.excitement.as_slice(),
            Mood::Focus => self.focus.as_slice(),
            Mood::Calm => self.calm.as_slice(),
            Mood::Other(_) => &[],
        }
    }

    fn slot_mut(&mut self, mood: &Mood) -> Option<&mut Vec<Track>> {
        match mood {
            Mood::Relaxation => Some(&mut self.relaxation),
            Mood::Excitement => Some(&mut self.excitement),
            Mood::Focus => Some(&mut self.focus),
            Mood::Calm => Some(&mut self.calm),
            Mood::Other(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        Mood::CANONICAL.iter().all(|mood| self.get(mood).is_empty())
    }
}

/// One distinct food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    /// Default taste; `None` (emitted as "") when the source cell was blank
    #[serde(serialize_with = "serialize_taste", deserialize_with = "deserialize_taste")]
    pub taste: Option<Taste>,
    #[serde(default)]
    pub options: Vec<Taste>,
    #[serde(default)]
    pub music: MoodTracks,
    /// Recorded from the food sheet but not part of the document
    #[serde(skip)]
    pub allow_choice: bool,
}

fn serialize_taste<S: Serializer>(taste: &Option<Taste>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(taste.as_ref().map(Taste::as_str).unwrap_or(""))
}

fn deserialize_taste<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Taste>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(Taste::normalize(&raw))
}

impl FoodEntry {
    fn new(id: String, taste: Option<Taste>, allow_choice: bool) -> Self {
        Self {
            id,
            taste,
            options: Vec::new(),
            music: MoodTracks::default(),
            allow_choice,
        }
    }
}

/// Ordered food name → entry mapping, first-appearance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    entries: Vec<(String, FoodEntry)>,
    positions: HashMap<String, usize>,
    missing_columns: Vec<FoodField>,
}

impl Catalogue {
    /// Fold the food sheet into entries; `music` stays empty
    pub fn collect_foods(table: &Table) -> Self {
        let columns = FoodColumns::resolve(table);
        let mut catalogue = Catalogue {
            missing_columns: columns.missing.clone(),
            ..Default::default()
        };

        for row in table.rows() {
            let Some(food_name) = row.get(columns.food_name).trimmed_text() else {
                continue;
            };

            let entry = catalogue.entry_or_insert_with(food_name, || {
                FoodEntry::new(
                    row.get(columns.food_id).trimmed_text().unwrap_or_default(),
                    normalize_taste(row.get(columns.default_taste)),
                    coerce_boolean(row.get(columns.allow_choice)).unwrap_or(false),
                )
            });

            if let Some(option) = normalize_taste(row.get(columns.option_taste)) {
                entry.options.push(option);
            }
        }

        debug!("Collected {} foods from {} rows", catalogue.len(), table.row_count());
        catalogue
    }

    /// Fill each entry's per-mood lists from its default taste
    pub fn attach_music(&mut self, index: &TrackIndex) {
        for (name, entry) in &mut self.entries {
            let Some(moods) = entry.taste.as_ref().and_then(|taste| index.moods_for(taste)) else {
                continue;
            };
            for (mood, tracks) in moods {
                match entry.music.slot_mut(mood) {
                    Some(slot) => *slot = tracks.clone(),
                    None => warn!(
                        "Food '{}': {} tracks filed under unknown mood '{}' are not included",
                        name,
                        tracks.len(),
                        mood
                    ),
                }
            }
        }
    }

    /// Both phases: collect foods, then attach music
    pub fn build(table: &Table, index: &TrackIndex) -> Self {
        let mut catalogue = Self::collect_foods(table);
        catalogue.attach_music(index);
        catalogue
    }

    fn entry_or_insert_with(
        &mut self,
        name: String,
        create: impl FnOnce() -> FoodEntry,
    ) -> &mut FoodEntry {
        let idx = match self.positions.get(&name) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.positions.insert(name.clone(), idx);
                self.entries.push((name, create()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Append an entry; an existing name is replaced in place
    pub fn insert(&mut self, name: String, entry: FoodEntry) {
        match self.positions.get(&name) {
            Some(&idx) => self.entries[idx].1 = entry,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, entry));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FoodEntry> {
        self.positions.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FoodEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Food sheet columns that were missing and read as empty
    pub fn missing_columns(&self) -> &[FoodField] {
        &self.missing_columns
    }
}
