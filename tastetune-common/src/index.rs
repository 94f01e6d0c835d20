//! Taste × mood track index
//!
//! Rows are sorted by (taste, mood), with rank as a third key only when at
//! least one row anywhere in the sheet carries a rank. Without ranks the
//! original row order inside each (taste, mood) group is kept.

use crate::tracks::{Track, TrackRow};
use crate::vocab::{Mood, Taste};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Immutable taste → mood → ordered tracks mapping
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    groups: BTreeMap<Taste, BTreeMap<Mood, Vec<Track>>>,
    ranked: bool,
}

impl TrackIndex {
    /// Sort and group extracted rows
    pub fn build(mut rows: Vec<TrackRow>) -> Self {
        let ranked = rows.iter().any(|row| row.rank_key.is_some());
        if ranked {
            sort_by_taste_mood_rank(&mut rows);
        } else {
            sort_by_taste_mood(&mut rows);
        }

        let mut groups: BTreeMap<Taste, BTreeMap<Mood, Vec<Track>>> = BTreeMap::new();
        for row in rows {
            groups
                .entry(row.taste)
                .or_default()
                .entry(row.mood)
                .or_default()
                .push(row.track);
        }

        debug!(
            "Track index built: {} tastes, ranked ordering {}",
            groups.len(),
            if ranked { "on" } else { "off" }
        );
        Self { groups, ranked }
    }

    /// Tracks for a (taste, mood) pair; empty when nothing matches
    pub fn tracks_for(&self, taste: &Taste, mood: &Mood) -> &[Track] {
        self.groups
            .get(taste)
            .and_then(|moods| moods.get(mood))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All mood groups filed under a taste
    pub fn moods_for(&self, taste: &Taste) -> Option<&BTreeMap<Mood, Vec<Track>>> {
        self.groups.get(taste)
    }

    /// Whether rank participated in the ordering
    pub fn is_ranked(&self) -> bool {
        self.ranked
    }

    pub fn track_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|moods| moods.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Stable sort on (taste, mood) only
fn sort_by_taste_mood(rows: &mut [TrackRow]) {
    rows.sort_by(|a, b| a.taste.cmp(&b.taste).then_with(|| a.mood.cmp(&b.mood)));
}

/// Stable sort on (taste, mood, rank); unranked rows follow ranked ones
fn sort_by_taste_mood_rank(rows: &mut [TrackRow]) {
    rows.sort_by(|a, b| {
        a.taste
            .cmp(&b.taste)
            .then_with(|| a.mood.cmp(&b.mood))
            .then_with(|| compare_rank(a.rank_key, b.rank_key))
    });
}

fn compare_rank(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
