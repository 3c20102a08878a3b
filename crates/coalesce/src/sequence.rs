//! Renumbers designated sequence columns to a dense 1..N range.

/// Post-merge pass that overwrites sequence columns with the 1-based output
/// position of each row. Other integer identifier columns are untouched.
pub struct Sequencer {
    columns: Vec<String>,
}

impl Sequencer {
    /// Create a sequencer for the given column names. Names absent from the
    /// table are ignored.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Renumber in place.
    pub fn renumber(&self, table: &mut crate::input::DataTable) {
        for name in &self.columns {
            let Some(col) = table.column_index(name) else {
                continue;
            };
            for row in 0..table.row_count() {
                table.set(row, col, (row + 1).to_string());
            }
        }
    }
}
