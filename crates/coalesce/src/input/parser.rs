//! TSV parser for the merged contact export.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{CoalesceError, Result};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter. The merge step upstream always emits tab-separated
    /// output, but comma works for ad-hoc runs.
    pub delimiter: u8,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            has_header: true,
            quote: b'"',
        }
    }
}

/// Parses the tabular input file.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration (tab-delimited).
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and source metadata.
    ///
    /// A missing or unreadable file is fatal and the error names the path.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| CoalesceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let metadata = file.metadata().map_err(|e| CoalesceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = metadata.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| CoalesceError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;

        let format = match self.config.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.is_empty() {
            return Err(CoalesceError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Ragged rows: pad short, truncate long.
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(CoalesceError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, self.config.delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv() {
        let parser = Parser::new();
        let data = b"EMAIL\tFULLNAME\tMOBILE\na@x.com\tAnn Lee\t0412345678\n\tBob Ray\t0498765432\n";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.headers, vec!["EMAIL", "FULLNAME", "MOBILE"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("Ann Lee"));
        assert_eq!(table.get(1, 0), Some(""));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let data = b"A\tB\tC\n1\t2\n";
        let table = parser.parse_bytes(data).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn test_parse_empty_is_error() {
        let parser = Parser::new();
        let data = b"A\tB\tC\n";
        assert!(matches!(
            parser.parse_bytes(data),
            Err(CoalesceError::EmptyData(_))
        ));
    }

    #[test]
    fn test_missing_file_names_path() {
        let parser = Parser::new();
        let err = parser.parse_file("/no/such/contacts.tsv").unwrap_err();
        assert!(err.to_string().contains("/no/such/contacts.tsv"));
    }
}
