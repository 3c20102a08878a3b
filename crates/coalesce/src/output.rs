//! Writes the canonical table back out.

use std::fs::File;
use std::path::Path;

use crate::error::{CoalesceError, Result};
use crate::input::DataTable;

/// Write a table to the given path with its own delimiter. Called only after
/// every in-memory stage has succeeded, so a failed run leaves no output.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CoalesceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .from_writer(file);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| CoalesceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
