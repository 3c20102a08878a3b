//! Reduces the rows of one identity group into a canonical row.

use crate::input::DataTable;

use super::policy::{CombineRule, MergePolicy};

/// Applies the merge policy column by column. A canonical row can combine
/// fields sourced from different member rows; it never contains a value that
/// was not present verbatim in the group.
pub struct MergeEngine {
    policy: MergePolicy,
}

impl MergeEngine {
    /// Create an engine with the default (most-complete) policy.
    pub fn new() -> Self {
        Self {
            policy: MergePolicy::new(),
        }
    }

    /// Create an engine with a custom policy.
    pub fn with_policy(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Merge one group. `members` are row indices into `table`, ordered
    /// most-recently-updated first.
    pub fn merge_group(&self, table: &DataTable, members: &[usize]) -> Vec<String> {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(col, name)| self.combine_column(table, members, col, self.policy.rule_for(name)))
            .collect()
    }

    fn combine_column(
        &self,
        table: &DataTable,
        members: &[usize],
        col: usize,
        rule: CombineRule,
    ) -> String {
        let mut values = members
            .iter()
            .filter_map(|&row| table.get(row, col))
            .filter(|v| !v.is_empty());

        match rule {
            CombineRule::MostRecent => values.next().map(str::to_string).unwrap_or_default(),
            CombineRule::MostComplete => {
                let mut best: Option<&str> = None;
                for value in values {
                    // Strictly longer wins; ties keep the earlier (more
                    // recent) row's value.
                    if best.map_or(true, |b| value.len() > b.len()) {
                        best = Some(value);
                    }
                }
                best.map(str::to_string).unwrap_or_default()
            }
        }
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}
