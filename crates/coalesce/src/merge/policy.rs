//! Merge policy as data: a per-column combine rule table with a default.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How the values of one column are reduced across a group. Group members
/// arrive most-recently-updated first, so "earlier" means "more recent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineRule {
    /// Longest non-null value wins; ties go to the earlier row.
    MostComplete,
    /// First non-null value wins.
    MostRecent,
}

impl Default for CombineRule {
    fn default() -> Self {
        CombineRule::MostComplete
    }
}

/// The combine rule table. Columns without an override use the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergePolicy {
    /// Rule applied to columns without an override.
    pub default_rule: CombineRule,
    /// Per-column overrides.
    pub overrides: IndexMap<String, CombineRule>,
}

impl MergePolicy {
    /// Most-complete everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rule for one column.
    pub fn with_rule(mut self, column: impl Into<String>, rule: CombineRule) -> Self {
        self.overrides.insert(column.into(), rule);
        self
    }

    /// Set the default rule.
    pub fn with_default(mut self, rule: CombineRule) -> Self {
        self.default_rule = rule;
        self
    }

    /// The rule in effect for a column.
    pub fn rule_for(&self, column: &str) -> CombineRule {
        self.overrides
            .get(column)
            .copied()
            .unwrap_or(self.default_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_and_default() {
        let policy = MergePolicy::new().with_rule("LAST_UPDATED", CombineRule::MostRecent);
        assert_eq!(policy.rule_for("LAST_UPDATED"), CombineRule::MostRecent);
        assert_eq!(policy.rule_for("EMAIL"), CombineRule::MostComplete);
    }
}
