//! Whole-table normalization pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::schema::ContactSchema;

use super::fields::normalize_field;

/// Per-column counts accumulated while normalizing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Values that were non-null on input and nulled by validation,
    /// keyed by column name. Columns with zero nulled values are omitted.
    pub nulled_by_column: IndexMap<String, usize>,
}

impl NormalizeStats {
    /// Total values nulled across all columns.
    pub fn total_nulled(&self) -> usize {
        self.nulled_by_column.values().sum()
    }
}

/// Applies the schema rule table to every cell of a table.
pub struct Normalizer {
    schema: ContactSchema,
}

impl Normalizer {
    /// Create a normalizer for the given schema.
    pub fn new(schema: ContactSchema) -> Self {
        Self { schema }
    }

    /// Normalize every cell, returning the normalized table and the stats.
    /// Invalid values degrade to the empty string; rows are never dropped.
    pub fn normalize_table(&self, table: &DataTable) -> (DataTable, NormalizeStats) {
        let mut stats = NormalizeStats::default();

        let kinds: Vec<_> = table
            .headers
            .iter()
            .map(|name| self.schema.kind_of(name))
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(kinds.iter())
                    .enumerate()
                    .map(|(col, (raw, &kind))| match normalize_field(kind, raw) {
                        Some(value) => value,
                        None => {
                            if !DataTable::is_null_value(raw) {
                                *stats
                                    .nulled_by_column
                                    .entry(table.headers[col].clone())
                                    .or_insert(0) += 1;
                            }
                            String::new()
                        }
                    })
                    .collect()
            })
            .collect();

        let normalized = DataTable::new(table.headers.clone(), rows, table.delimiter);
        (normalized, stats)
    }
}
