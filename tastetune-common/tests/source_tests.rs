//! Integration tests for sheet sources and the full run
//!
//! Tests cover:
//! - CSV directory sources (BOM, ragged rows, header trimming)
//! - Workbook sources (typed cells, date-formatted cells, sheet lookup)
//! - Fatal failures (missing source, missing sheet, missing required
//!   column) produce no output file
//! - Document write/load round trip through the filesystem

use std::fs;
use std::path::{Path, PathBuf};
use tastetune_common::config::PipelineConfig;
use tastetune_common::document::load_document;
use tastetune_common::pipeline::{run, LENIENCY_SUMMARY};
use tastetune_common::source::{CsvDirectory, SheetSource, XlsxWorkbook};
use tastetune_common::{CellValue, Error, Taste};
use tempfile::TempDir;

const SHEET_A: &str = "食品ー味覚";
const SHEET_B: &str = "味覚ー気分ー音楽";

/// Test helper: write one CSV sheet into the directory
fn write_sheet(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(format!("{name}.csv")), content).unwrap();
}

/// Test helper: workbook holding both sheets with typed cells
fn fixture_workbook() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/taste_sheets.xlsx")
}

fn config_for(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        input: dir.path().to_path_buf(),
        output: dir.path().join("data.json"),
        sheet_a: SHEET_A.to_string(),
        sheet_b: SHEET_B.to_string(),
    }
}

fn write_valid_sheets(dir: &Path) {
    write_sheet(
        dir,
        SHEET_A,
        "food_id,food_name,default_taste,allow_choice,option_taste\n\
         F1,カレー,辛味,TRUE,甘味\n\
         F2,レモン,すっぱい,FALSE,\n\
         F1,カレー,,,塩味\n",
    );
    write_sheet(
        dir,
        SHEET_B,
        "味覚,気分,曲名,アーティスト,リンク,順位\n\
         spicy,元気,Song1,Band,u1,2\n\
         spicy,元気,Song2,,u2,1\n\
         sour,落ち着き,Calm Song,,audio/calm.mp3,\n",
    );
}

#[test]
fn test_csv_directory_reads_headers_and_cells() {
    let dir = TempDir::new().unwrap();
    write_sheet(dir.path(), "sheet", "\u{feff} taste ,mood\nsweet,calm\nsour\n");

    let table = CsvDirectory::new(dir.path()).read_sheet("sheet").unwrap();
    assert_eq!(table.columns(), &["taste".to_string(), "mood".to_string()]);
    assert_eq!(table.row_count(), 2);

    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows[0].get(Some(1)), &CellValue::Text("calm".to_string()));
    assert!(rows[1].get(Some(1)).is_empty());
}

#[test]
fn test_csv_directory_missing_sheet() {
    let dir = TempDir::new().unwrap();
    let err = CsvDirectory::new(dir.path()).read_sheet("absent").unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }), "{err}");
}

#[test]
fn test_workbook_reads_typed_cells() {
    let mut workbook = XlsxWorkbook::open(&fixture_workbook()).unwrap();
    let table = workbook.read_sheet(SHEET_B).unwrap();
    assert_eq!(table.columns()[0], "味覚");
    assert_eq!(table.column_index("インスト"), Some(7));
    assert_eq!(table.row_count(), 4);

    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows[0].get(Some(2)), &CellValue::Text("Song1".to_string()));
    assert_eq!(rows[0].get(Some(5)), &CellValue::Float(2.0));
    assert_eq!(rows[0].get(Some(6)), &CellValue::Float(0.5));
    assert_eq!(rows[0].get(Some(7)), &CellValue::Bool(true));
    assert!(rows[1].get(Some(3)).is_empty());
    // Date-formatted cell reads as its serial number
    assert_eq!(rows[2].get(Some(6)), &CellValue::Float(2.0));
}

#[test]
fn test_workbook_missing_sheet() {
    let mut workbook = XlsxWorkbook::open(&fixture_workbook()).unwrap();
    let err = workbook.read_sheet("absent").unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }), "{err}");
    assert!(err.to_string().contains("no such sheet"), "{err}");
}

#[test]
fn test_full_run_from_workbook() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        input: fixture_workbook(),
        ..config_for(&dir)
    };

    let summary = run(&config).unwrap();
    assert_eq!(summary.foods, 2);
    assert_eq!(summary.tracks, 3);
    assert!(summary.ranked);

    let catalogue = load_document(&config.output).unwrap();
    let names: Vec<&str> = catalogue.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["カレー", "レモン"]);

    let curry = catalogue.get("カレー").unwrap();
    assert_eq!(curry.id, "1");
    assert_eq!(curry.taste, Some(Taste::Spicy));
    assert_eq!(curry.options, vec![Taste::Sweet, Taste::Salty]);
    let excitement: Vec<&str> = curry.music.excitement.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(excitement, vec!["Song2", "Song1"]);

    let song1 = &curry.music.excitement[1];
    assert_eq!(song1.artist.as_deref(), Some("Band"));
    assert_eq!(song1.rank, Some(2));
    assert_eq!(song1.weight, 0.5);
    assert_eq!(song1.instrumental, Some(true));
    assert_eq!(curry.music.excitement[0].instrumental, Some(false));

    let lemon = catalogue.get("レモン").unwrap();
    assert_eq!(lemon.id, "2");
    let calm: Vec<&str> = lemon.music.calm.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(calm, vec!["Calm Song"]);
    assert_eq!(lemon.music.calm[0].weight, 2.0);
}

#[test]
fn test_full_run_writes_document() {
    let dir = TempDir::new().unwrap();
    write_valid_sheets(dir.path());
    let config = config_for(&dir);

    let summary = run(&config).unwrap();
    assert_eq!(summary.output, config.output);
    assert_eq!(summary.foods, 2);
    assert_eq!(summary.tracks, 3);
    assert!(summary.ranked);
    assert!(summary.missing_food_columns.is_empty());
    assert!(!LENIENCY_SUMMARY.is_empty());

    let text = fs::read_to_string(&config.output).unwrap();
    assert!(text.contains("カレー"), "raw UTF-8 expected:\n{text}");
    assert!(!dir.path().join("data.json.tmp").exists());

    let catalogue = load_document(&config.output).unwrap();
    let names: Vec<&str> = catalogue.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["カレー", "レモン"]);

    let curry = catalogue.get("カレー").unwrap();
    assert_eq!(curry.options, vec![Taste::Sweet, Taste::Salty]);
    let excitement: Vec<&str> = curry.music.excitement.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(excitement, vec!["Song2", "Song1"]);
    assert_eq!(curry.music.excitement[1].artist.as_deref(), Some("Band"));

    let lemon = catalogue.get("レモン").unwrap();
    assert_eq!(lemon.music.calm[0].uri, "audio/calm.mp3");
    assert!(lemon.music.calm[0].rank.is_none());
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    write_valid_sheets(dir.path());
    let config = config_for(&dir);

    run(&config).unwrap();
    let first = fs::read(&config.output).unwrap();
    run(&config).unwrap();
    let second = fs::read(&config.output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_sheet_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_valid_sheets(dir.path());
    let mut config = config_for(&dir);
    config.sheet_b = "no such sheet".to_string();

    let err = run(&config).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }), "{err}");
    assert!(!config.output.exists());
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.input = dir.path().join("missing.xlsx");

    let err = run(&config).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }), "{err}");
    assert!(!config.output.exists());
}

#[test]
fn test_missing_required_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_sheet(
        dir.path(),
        SHEET_A,
        "food_id,food_name,default_taste,allow_choice,option_taste\nF1,Curry,辛味,,\n",
    );
    write_sheet(dir.path(), SHEET_B, "taste,mood,title\nspicy,元気,Song\n");
    let config = config_for(&dir);

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("'uri'"), "{err}");
    assert!(!config.output.exists());
}

#[test]
fn test_missing_food_column_still_writes() {
    let dir = TempDir::new().unwrap();
    write_sheet(dir.path(), SHEET_A, "food_name,default_taste\nCurry,辛味\n");
    write_sheet(dir.path(), SHEET_B, "taste,mood,title,uri\nspicy,元気,Song,u\n");
    let config = config_for(&dir);

    let summary = run(&config).unwrap();
    assert_eq!(summary.missing_food_columns, vec!["food_id", "allow_choice", "option_taste"]);
    assert!(config.output.exists());
}

#[test]
fn test_load_missing_document_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_document(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");
}
