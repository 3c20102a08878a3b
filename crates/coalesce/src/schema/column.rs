//! Per-column rule kinds.

use serde::{Deserialize, Serialize};

/// The normalization/validation rule applied to a column. Adding a column to
/// the pipeline means mapping its name to one of these kinds in the schema
/// table, not writing new control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Email address: trim, lowercase, syntactic shape check; invalid → null.
    Email,
    /// Phone number: digits only, minimum length; too short → null.
    Phone,
    /// Person name or title: collapse whitespace, title-case.
    Name,
    /// Address line: trim only, case preserved.
    Address,
    /// Social handle: trim, lowercase.
    Social,
    /// Timestamp: ordered format list, canonical render; unparsable → null.
    Date,
    /// Boolean flag: only Y/N (any case) survive; anything else → null.
    Flag,
    /// Integer identifier: canonical render when numeric, otherwise passed
    /// through verbatim. Never nulled.
    Integer,
    /// Anything else: trim only.
    Text,
}

impl Default for FieldKind {
    fn default() -> Self {
        FieldKind::Text
    }
}
