//! Tabular dataset access for template binding.
//!
//! CSV files provide the binding vocabulary: column headers are what
//! mappings and `${column}` macros refer to. Empty cells behave like
//! nulls (a direct mapping skips them). Row filtering happens here too,
//! applied by the export layer before any binding.

use std::fs;
use std::path::Path;

use cardkit_core::{DataError, Result};

/// One dataset row: ordered (column, value) cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn from_pairs<C, V, I>(pairs: I) -> Self
    where
        C: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (C, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        }
    }

    /// The raw cell value, `None` when the column is absent from the
    /// dataset. An empty string is a present-but-null cell.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// The cell value when present and non-empty. Direct mappings use
    /// this: absent columns and null cells both leave the target alone.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// Column names present in this row, in dataset order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }
}

/// A loaded CSV file: named columns and their rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl DataTable {
    /// Load a CSV file with a header row. Unreadable or malformed files
    /// are a hard failure surfaced before any binding starts.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::DatasetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| DataError::DatasetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::DatasetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let cells = columns
                .iter()
                .enumerate()
                .map(|(i, col)| (col.clone(), record.get(i).unwrap_or_default().to_string()))
                .collect();
            rows.push(Row { cells });
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply filters: column predicates narrow the table in order, then
    /// row ranges (1-based, inclusive, against the filtered ordering)
    /// select a union of slices.
    pub fn filtered(&self, filters: &[RowFilter]) -> DataTable {
        let mut rows: Vec<Row> = self.rows.clone();

        for filter in filters {
            if let RowFilter::Column { column, op, value } = filter {
                rows.retain(|row| op.matches(row.get(column), value));
            }
        }

        let ranges: Vec<(usize, usize)> = filters
            .iter()
            .filter_map(|f| match f {
                RowFilter::Range { start, end } => {
                    let start = start.saturating_sub(1);
                    let end = end.unwrap_or(rows.len()).min(rows.len());
                    (start < end).then_some((start, end))
                }
                _ => None,
            })
            .collect();

        if !ranges.is_empty() {
            rows = rows
                .into_iter()
                .enumerate()
                .filter(|(i, _)| ranges.iter().any(|(s, e)| i >= s && i < e))
                .map(|(_, row)| row)
                .collect();
        }

        DataTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Comparison operator of a column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    NotEquals,
    /// Case-insensitive substring match.
    Contains,
    GreaterThan,
    LessThan,
    /// Numeric inclusive range, value formatted "low-high".
    Range,
}

impl FilterOp {
    fn matches(&self, cell: Option<&str>, value: &str) -> bool {
        let Some(cell) = cell else {
            return false;
        };
        match self {
            Self::Equals => cell == value,
            Self::NotEquals => cell != value,
            Self::Contains => cell.to_lowercase().contains(&value.to_lowercase()),
            Self::GreaterThan => match (cell.parse::<f64>(), value.parse::<f64>()) {
                (Ok(a), Ok(b)) => a > b,
                _ => false,
            },
            Self::LessThan => match (cell.parse::<f64>(), value.parse::<f64>()) {
                (Ok(a), Ok(b)) => a < b,
                _ => false,
            },
            Self::Range => {
                let Some((low, high)) = value.split_once('-') else {
                    return false;
                };
                match (
                    cell.parse::<f64>(),
                    low.trim().parse::<f64>(),
                    high.trim().parse::<f64>(),
                ) {
                    (Ok(v), Ok(lo), Ok(hi)) => v >= lo && v <= hi,
                    _ => false,
                }
            }
        }
    }
}

/// A row selection rule applied before binding.
#[derive(Debug, Clone, PartialEq)]
pub enum RowFilter {
    /// Keep rows in a 1-based inclusive range; `end: None` runs to the
    /// last row.
    Range { start: usize, end: Option<usize> },
    /// Keep rows whose cell matches the predicate.
    Column {
        column: String,
        op: FilterOp,
        value: String,
    },
}

/// CSV filenames available in a data directory, sorted.
pub fn list_csv_files(dir: impl AsRef<Path>) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir.as_ref()) else {
        return Vec::new();
    };
    let mut files: Vec<String> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if is_csv {
                path.file_name().and_then(|n| n.to_str()).map(String::from)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}
