//! Immutable in-memory table of raw CSV cells.
//!
//! The over-time and percentile snapshots have open-ended column sets
//! (`top1_ms`, `p50_ms`, …), so they are kept as string cells and converted
//! at the point of use. Filtering always yields a new table.

use std::io::Read;

use time::OffsetDateTime;

use super::timing::parse_timestamp;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Parse a headed CSV document. Short rows are padded with empty cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::new(columns, rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Raw cell text; blank cells count as missing.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Finite numeric value of a cell. `NaN`, blanks and text are missing.
    pub fn number(&self, row: usize, column: usize) -> Option<f64> {
        self.cell(row, column)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn timestamps(&self, column: usize) -> Vec<Option<OffsetDateTime>> {
        (0..self.len())
            .map(|row| self.cell(row, column).and_then(parse_timestamp))
            .collect()
    }

    /// Keep the rows for which `keep(row_index)` holds.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(usize) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(idx, _)| keep(*idx))
            .map(|(_, row)| row.clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Rows whose `column` cell equals `value` exactly.
    pub fn rows_matching(&self, column: &str, value: &str) -> Table {
        match self.column_index(column) {
            Some(idx) => self.filter_rows(|row| self.cell(row, idx) == Some(value)),
            None => self.filter_rows(|_| false),
        }
    }
}
