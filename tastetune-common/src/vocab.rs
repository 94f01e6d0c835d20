//! Taste/mood vocabulary folding and boolean coercion
//!
//! Raw sheet values arrive in several spellings (English, kanji, kana,
//! romaji). They are folded onto a fixed vocabulary of five tastes and four
//! moods. Unrecognized values are not rejected: they pass through
//! lower-cased as `Other`.

use crate::table::CellValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Food flavor profile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Taste {
    Sweet,
    Sour,
    Bitter,
    Salty,
    Spicy,
    /// Unrecognized token, stored lower-cased
    Other(String),
}

/// Desired listening context
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mood {
    Relaxation,
    Excitement,
    Focus,
    Calm,
    /// Unrecognized token, stored lower-cased
    Other(String),
}

impl Taste {
    /// The five canonical tastes
    pub const CANONICAL: [Taste; 5] = [
        Taste::Sweet,
        Taste::Sour,
        Taste::Bitter,
        Taste::Salty,
        Taste::Spicy,
    ];

    fn lookup(raw: &str) -> Option<Taste> {
        match raw {
            "甘味" | "あまい" | "sweet" => Some(Taste::Sweet),
            "酸味" | "すっぱい" | "sour" => Some(Taste::Sour),
            "苦味" | "にがい" | "bitter" => Some(Taste::Bitter),
            "塩味" | "しょっぱい" | "salty" => Some(Taste::Salty),
            "辛味" | "からい" | "spicy" => Some(Taste::Spicy),
            _ => None,
        }
    }

    /// Fold raw text onto the vocabulary; `None` for blank input
    pub fn normalize(raw: &str) -> Option<Taste> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(taste) = Self::lookup(trimmed) {
            return Some(taste);
        }
        // Only the canonical tokens fold case-insensitively
        let lowered = trimmed.to_lowercase();
        let canonical = Self::CANONICAL.iter().find(|taste| taste.as_str() == lowered);
        Some(canonical.cloned().unwrap_or(Taste::Other(lowered)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Taste::Sweet => "sweet",
            Taste::Sour => "sour",
            Taste::Bitter => "bitter",
            Taste::Salty => "salty",
            Taste::Spicy => "spicy",
            Taste::Other(s) => s.as_str(),
        }
    }

    /// Japanese display label; unknown tokens display as themselves
    pub fn label(&self) -> &str {
        match self {
            Taste::Sweet => "甘味",
            Taste::Sour => "酸味",
            Taste::Bitter => "苦味",
            Taste::Salty => "塩味",
            Taste::Spicy => "辛味",
            Taste::Other(s) if s == "umami" => "旨味",
            Taste::Other(s) => s.as_str(),
        }
    }
}

impl Mood {
    /// The four canonical moods, in document key order
    pub const CANONICAL: [Mood; 4] = [Mood::Relaxation, Mood::Excitement, Mood::Focus, Mood::Calm];

    fn lookup(raw: &str) -> Option<Mood> {
        match raw {
            "リラックス" | "relax" | "relaxation" => Some(Mood::Relaxation),
            "元気" | "genki" | "excitement" => Some(Mood::Excitement),
            "集中" | "shuchu" | "focus" => Some(Mood::Focus),
            "落ち着き" | "ochitsuki" | "calm" => Some(Mood::Calm),
            _ => None,
        }
    }

    /// Fold raw text onto the vocabulary; `None` for blank input
    pub fn normalize(raw: &str) -> Option<Mood> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(mood) = Self::lookup(trimmed) {
            return Some(mood);
        }
        let lowered = trimmed.to_lowercase();
        let canonical = Self::CANONICAL.iter().find(|mood| mood.as_str() == lowered);
        Some(canonical.cloned().unwrap_or(Mood::Other(lowered)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mood::Relaxation => "relaxation",
            Mood::Excitement => "excitement",
            Mood::Focus => "focus",
            Mood::Calm => "calm",
            Mood::Other(s) => s.as_str(),
        }
    }

    /// Japanese display label; unknown tokens display as themselves
    pub fn label(&self) -> &str {
        match self {
            Mood::Relaxation => "リラックス",
            Mood::Excitement => "元気",
            Mood::Focus => "集中",
            Mood::Calm => "落ち着き",
            Mood::Other(s) => s.as_str(),
        }
    }
}

// Tokens order lexically so that sorting matches the textual document keys.
macro_rules! token_traits {
    ($ty:ident) => {
        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $ty::normalize(&raw)
                    .ok_or_else(|| serde::de::Error::custom(concat!("empty ", stringify!($ty))))
            }
        }
    };
}

token_traits!(Taste);
token_traits!(Mood);

/// Normalize a taste cell; empty cells and blank text yield `None`
pub fn normalize_taste(cell: &CellValue) -> Option<Taste> {
    cell.text().and_then(|s| Taste::normalize(&s))
}

/// Normalize a mood cell; empty cells and blank text yield `None`
pub fn normalize_mood(cell: &CellValue) -> Option<Mood> {
    cell.text().and_then(|s| Mood::normalize(&s))
}

const TRUE_TOKENS: &[&str] = &["true", "1", "t", "yes", "y", "はい", "有", "インスト", "instrumental"];
const FALSE_TOKENS: &[&str] = &["false", "0", "f", "no", "n", "いいえ", "無", "歌詞あり", "vocal"];

/// Tri-state boolean coercion: unrecognized tokens and empty cells are `None`
pub fn coerce_boolean(cell: &CellValue) -> Option<bool> {
    if let CellValue::Bool(b) = cell {
        return Some(*b);
    }
    let token = cell.text()?.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}
