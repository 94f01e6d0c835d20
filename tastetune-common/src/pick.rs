//! Track picker for a food × mood selection
//!
//! Ranked tracks win outright (lowest rank first); otherwise one track is
//! drawn at random in proportion to its weight.

use crate::tracks::{Track, DEFAULT_WEIGHT};
use rand::Rng;

/// How a track's uri is played back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriKind {
    /// Local audio file, playable in place
    LocalAudio,
    /// Streaming or video page, opened externally
    External,
}

const LOCAL_AUDIO_EXTENSIONS: [&str; 4] = [".mp3", ".m4a", ".wav", ".ogg"];

impl UriKind {
    pub fn classify(uri: &str) -> Self {
        let local_file = LOCAL_AUDIO_EXTENSIONS.iter().any(|ext| uri.ends_with(ext));
        if uri.starts_with("audio/") || local_file {
            UriKind::LocalAudio
        } else {
            UriKind::External
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UriKind::LocalAudio => "local audio",
            UriKind::External => "external link",
        }
    }
}

/// Choose one track; `None` only for an empty list
pub fn pick_track<'a, R: Rng + ?Sized>(tracks: &'a [Track], rng: &mut R) -> Option<&'a Track> {
    if tracks.is_empty() {
        return None;
    }

    // min_by_key keeps the first of equal ranks
    if let Some(ranked) = tracks
        .iter()
        .filter(|t| t.rank.is_some())
        .min_by_key(|t| t.rank)
    {
        return Some(ranked);
    }

    let weight = |t: &Track| if t.weight.is_finite() { t.weight } else { DEFAULT_WEIGHT };
    let total: f64 = tracks.iter().map(weight).sum();
    let mut remaining = rng.gen::<f64>() * total;
    for track in tracks {
        remaining -= weight(track);
        if remaining <= 0.0 {
            return Some(track);
        }
    }
    tracks.last()
}
