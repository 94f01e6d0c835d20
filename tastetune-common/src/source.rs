//! Sheet sources: workbooks and CSV directories
//!
//! Both implementations materialize a whole sheet into a `Table`. Any
//! failure to open the source or find a sheet is `SourceUnavailable`.

use crate::table::{CellValue, Table};
use crate::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reader of named sheets
pub trait SheetSource {
    /// Read a sheet by name; the first row is the header row
    fn read_sheet(&mut self, name: &str) -> Result<Table>;
}

/// Open a source: a directory is read as CSV files, anything else as a workbook
pub fn open_source(path: &Path) -> Result<Box<dyn SheetSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvDirectory::new(path)))
    } else {
        Ok(Box::new(XlsxWorkbook::open(path)?))
    }
}

/// Spreadsheet workbook (xlsx, xlsm, xls, ods)
pub struct XlsxWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        let sheets = open_workbook_auto(path)
            .map_err(|e| Error::source_unavailable(path.display().to_string(), e))?;
        debug!("Opened workbook {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

impl SheetSource for XlsxWorkbook {
    fn read_sheet(&mut self, name: &str) -> Result<Table> {
        let source_name = format!("{} [{}]", self.path.display(), name);
        if !self.sheets.sheet_names().iter().any(|s| s == name) {
            return Err(Error::source_unavailable(source_name, "no such sheet"));
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| Error::source_unavailable(source_name.clone(), e))?;

        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| convert_cell(cell).text().unwrap_or_default())
                .collect(),
            None => Vec::new(),
        };
        let body: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        debug!("Read {} rows from {}", body.len(), source_name);
        Ok(Table::new(columns, body))
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
    }
}

/// Directory of `<sheet name>.csv` files
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }
}

impl SheetSource for CsvDirectory {
    fn read_sheet(&mut self, name: &str) -> Result<Table> {
        let path = self.sheet_path(name);
        let source_name = path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| Error::source_unavailable(source_name.clone(), e))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::source_unavailable(source_name.clone(), e))?
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                if idx == 0 {
                    label.trim_start_matches('\u{feff}').to_string()
                } else {
                    label.to_string()
                }
            })
            .collect();

        let mut body: Vec<Vec<CellValue>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::source_unavailable(source_name.clone(), e))?;
            body.push(record.iter().map(CellValue::from_text).collect());
        }

        debug!("Read {} rows from {}", body.len(), source_name);
        Ok(Table::new(columns, body))
    }
}
