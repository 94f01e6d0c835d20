//! # Tastetune Common Library
//!
//! Converts a food→taste sheet and a taste/mood→music sheet into one
//! food-keyed document of per-mood track lists. Includes:
//! - Sheet sources (xlsx workbooks, CSV directories) and the `Table` model
//! - Taste/mood vocabulary folding and boolean coercion
//! - Column alias resolution
//! - Track extraction, the taste×mood track index and the food catalogue
//! - Document write/load and the track picker
//! - Configuration loading

pub mod catalogue;
pub mod columns;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod pick;
pub mod pipeline;
pub mod source;
pub mod table;
pub mod tracks;
pub mod vocab;

pub use catalogue::{Catalogue, FoodEntry, MoodTracks};
pub use error::{Error, Result};
pub use index::TrackIndex;
pub use table::{CellValue, Table};
pub use tracks::Track;
pub use vocab::{Mood, Taste};
