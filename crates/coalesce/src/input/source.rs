//! In-memory table and source file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Format label derived from the delimiter (tsv, csv, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// A tabular row-set held in memory. Cells are raw strings; the empty string
/// is the null representation throughout the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter the table was read with (and will be written with).
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Overwrite a specific cell value.
    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Check if a raw cell represents a missing value. The upstream exporters
    /// stringify missing cells as "nan" (pandas) or the usual NA spellings.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed == "."
            || trimmed == "-"
    }
}
