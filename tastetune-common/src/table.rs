//! Row-oriented sheet model shared by every sheet source
//!
//! A `Table` is a header row of (trimmed) column labels plus fully
//! materialized rows of typed cells, in source order.

use std::collections::HashMap;

/// One cell as read from a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Build a cell from raw text, mapping the empty string to `Empty`
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Textual form of the cell, `None` for empty cells
    ///
    /// Integral floats render without a fractional part so that a numeric
    /// `1.0` cell reads the same as the text `1`.
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(format_float(*f)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    /// Trimmed textual form, `None` when empty or blank
    pub fn trimmed_text(&self) -> Option<String> {
        self.text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Best-effort numeric coercion; only finite values are accepted
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Int(i) => *i as f64,
            CellValue::Float(f) => *f,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty | CellValue::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Fully materialized sheet
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    positions: HashMap<String, usize>,
}

impl Table {
    /// Create a table; column labels are trimmed, first occurrence wins on duplicates
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(|c| c.trim().to_string()).collect();
        let mut positions = HashMap::new();
        for (idx, name) in columns.iter().enumerate() {
            positions.entry(name.clone()).or_insert(idx);
        }
        Self {
            columns,
            rows,
            positions,
        }
    }

    /// Convenience constructor from string literals (empty string = empty cell)
    pub fn from_strings(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| CellValue::from_text(cell)).collect())
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Physical index of a column by exact (trimmed) label
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row { cells })
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    /// Cell at `column`; an absent column or a short row reads as empty
    pub fn get(&self, column: Option<usize>) -> &'a CellValue {
        column
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_labels_are_trimmed() {
        let table = Table::from_strings(&["  taste ", "mood"], &[]);
        assert_eq!(table.columns(), &["taste".to_string(), "mood".to_string()]);
        assert_eq!(table.column_index("taste"), Some(0));
        assert_eq!(table.column_index("  taste "), None);
    }

    #[test]
    fn test_duplicate_labels_first_wins() {
        let table = Table::from_strings(&["uri", "uri"], &[]);
        assert_eq!(table.column_index("uri"), Some(0));
    }

    #[test]
    fn test_short_row_reads_empty() {
        let table = Table::from_strings(&["a", "b"], &[&["x"]]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get(Some(0)), &CellValue::Text("x".to_string()));
        assert!(row.get(Some(1)).is_empty());
        assert!(row.get(None).is_empty());
    }

    #[test]
    fn test_float_text_rendering() {
        assert_eq!(CellValue::Float(1.0).text().as_deref(), Some("1"));
        assert_eq!(CellValue::Float(2.5).text().as_deref(), Some("2.5"));
        assert_eq!(CellValue::Int(-3).text().as_deref(), Some("-3"));
        assert_eq!(CellValue::Empty.text(), None);
    }

    #[test]
    fn test_trimmed_text_blank_is_none() {
        assert_eq!(CellValue::Text("   ".to_string()).trimmed_text(), None);
        assert_eq!(
            CellValue::Text(" Curry ".to_string()).trimmed_text().as_deref(),
            Some("Curry")
        );
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Text(" 2 ".to_string()).as_number(), Some(2.0));
        assert_eq!(CellValue::Int(7).as_number(), Some(7.0));
        assert_eq!(CellValue::Text("abc".to_string()).as_number(), None);
        assert_eq!(CellValue::Text("NaN".to_string()).as_number(), None);
        assert_eq!(CellValue::Float(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }
}
