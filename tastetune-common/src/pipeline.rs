//! End-to-end conversion: sheets in, food-keyed document out

use crate::catalogue::Catalogue;
use crate::config::PipelineConfig;
use crate::document::write_document;
use crate::index::TrackIndex;
use crate::source::{open_source, SheetSource};
use crate::table::Table;
use crate::tracks::extract_tracks;
use crate::Result;
use std::path::PathBuf;
use tracing::info;

/// Leniency policies applied on every successful run
pub const LENIENCY_SUMMARY: &str = "foods carry the tracks of their default taste per mood; \
     music rows missing taste, mood, title or uri were dropped; \
     unparseable rank, weight and instrumental values were treated as absent";

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub foods: usize,
    pub tracks: usize,
    pub ranked: bool,
    /// Food sheet columns that were missing (warned, read as empty)
    pub missing_food_columns: Vec<&'static str>,
}

/// Core transformation on already-read sheets
///
/// Fails only when the music sheet lacks a required column.
pub fn convert(food_sheet: &Table, music_sheet: &Table) -> Result<(Catalogue, TrackIndex)> {
    let index = TrackIndex::build(extract_tracks(music_sheet)?);
    let catalogue = Catalogue::build(food_sheet, &index);
    Ok((catalogue, index))
}

/// Read both sheets from `source`, convert, and write the document
///
/// Nothing is written unless every fatal check has passed.
pub fn run_with_source(
    source: &mut dyn SheetSource,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let food_sheet = source.read_sheet(&config.sheet_a)?;
    let music_sheet = source.read_sheet(&config.sheet_b)?;
    info!(
        "Read sheets '{}' ({} rows) and '{}' ({} rows)",
        config.sheet_a,
        food_sheet.row_count(),
        config.sheet_b,
        music_sheet.row_count()
    );

    let (catalogue, index) = convert(&food_sheet, &music_sheet)?;
    write_document(&config.output, &catalogue)?;

    Ok(RunSummary {
        output: config.output.clone(),
        foods: catalogue.len(),
        tracks: index.track_count(),
        ranked: index.is_ranked(),
        missing_food_columns: catalogue.missing_columns().iter().map(|f| f.name()).collect(),
    })
}

/// Open the configured input and run the conversion
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    info!("Opening input {}", config.input.display());
    let mut source = open_source(&config.input)?;
    run_with_source(source.as_mut(), config)
}
