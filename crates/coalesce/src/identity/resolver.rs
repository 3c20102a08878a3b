//! Groups normalized rows that represent the same real-world contact.
//!
//! The primary key is the normalized email. Rows without one fall back to
//! (fullname, mobile). Groups are keyed in first-encounter order of the
//! original input, which fixes the output order; within a group, members are
//! ordered by `LAST_UPDATED` descending (nulls last) so the merge engine sees
//! the most recently updated row first.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoalesceError, Result};
use crate::input::DataTable;
use crate::normalize::fields::parse_date;
use crate::schema::{EMAIL_COLUMN, FULLNAME_COLUMN, LAST_UPDATED_COLUMN, MOBILE_COLUMN};

/// What to do with rows whose fullname and mobile are both null and which
/// have no email: they carry no identity at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnidentifiedPolicy {
    /// Each unidentifiable row becomes its own singleton group (default).
    Separate,
    /// All unidentifiable rows collapse into one group. This reproduces the
    /// legacy dedup-key behavior, where an empty key matched an empty key.
    MergeAll,
}

impl Default for UnidentifiedPolicy {
    fn default() -> Self {
        UnidentifiedPolicy::Separate
    }
}

/// Grouping key for one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Primary: the normalized email address.
    Email(String),
    /// Fallback: normalized full name + mobile digits (either may be empty,
    /// but not both).
    NameMobile { fullname: String, mobile: String },
    /// No usable identity; the row index keeps singletons distinct.
    Unidentified(usize),
}

/// Output of identity resolution.
#[derive(Debug, Clone)]
pub struct ResolvedGroups {
    /// Identity key → member row indices, keyed in first-encounter order.
    /// Members are ordered most-recently-updated first.
    pub groups: IndexMap<IdentityKey, Vec<usize>>,
    /// Rows keyed by email.
    pub primary_rows: usize,
    /// Rows keyed by the fullname/mobile fallback.
    pub fallback_rows: usize,
    /// Rows with no usable key at all.
    pub unidentified_rows: usize,
}

/// Computes identity keys and groups rows.
pub struct IdentityResolver {
    policy: UnidentifiedPolicy,
}

impl IdentityResolver {
    /// Create a resolver with the default (separate-singletons) policy.
    pub fn new() -> Self {
        Self {
            policy: UnidentifiedPolicy::default(),
        }
    }

    /// Create a resolver with an explicit unidentified-row policy.
    pub fn with_policy(policy: UnidentifiedPolicy) -> Self {
        Self { policy }
    }

    /// Group the rows of a normalized table by identity key.
    pub fn resolve(&self, table: &DataTable) -> Result<ResolvedGroups> {
        let email_col = required_column(table, EMAIL_COLUMN)?;
        let fullname_col = required_column(table, FULLNAME_COLUMN)?;
        let mobile_col = required_column(table, MOBILE_COLUMN)?;
        let updated_col = required_column(table, LAST_UPDATED_COLUMN)?;

        let mut groups: IndexMap<IdentityKey, Vec<usize>> = IndexMap::new();
        let mut primary_rows = 0;
        let mut fallback_rows = 0;
        let mut unidentified_rows = 0;

        for row in 0..table.row_count() {
            let email = table.get(row, email_col).unwrap_or("");
            let key = if !email.is_empty() {
                primary_rows += 1;
                IdentityKey::Email(email.to_string())
            } else {
                let fullname = table.get(row, fullname_col).unwrap_or("");
                let mobile = table.get(row, mobile_col).unwrap_or("");
                if fullname.is_empty() && mobile.is_empty() {
                    unidentified_rows += 1;
                    match self.policy {
                        UnidentifiedPolicy::Separate => IdentityKey::Unidentified(row),
                        UnidentifiedPolicy::MergeAll => IdentityKey::NameMobile {
                            fullname: String::new(),
                            mobile: String::new(),
                        },
                    }
                } else {
                    fallback_rows += 1;
                    IdentityKey::NameMobile {
                        fullname: fullname.to_string(),
                        mobile: mobile.to_string(),
                    }
                }
            };

            groups.entry(key).or_default().push(row);
        }

        // Most-recently-updated first within each group; null timestamps sort
        // last, ties keep input order (the sort is stable).
        for members in groups.values_mut() {
            members.sort_by(|&a, &b| {
                let da = row_timestamp(table, a, updated_col);
                let db = row_timestamp(table, b, updated_col);
                match (da, db) {
                    (Some(x), Some(y)) => y.cmp(&x),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }

        Ok(ResolvedGroups {
            groups,
            primary_rows,
            fallback_rows,
            unidentified_rows,
        })
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn required_column(table: &DataTable, name: &str) -> Result<usize> {
    table.column_index(name).ok_or_else(|| {
        CoalesceError::Config(format!("normalized table lacks the '{name}' column"))
    })
}

fn row_timestamp(table: &DataTable, row: usize, col: usize) -> Option<NaiveDateTime> {
    table.get(row, col).filter(|v| !v.is_empty()).and_then(parse_date)
}
