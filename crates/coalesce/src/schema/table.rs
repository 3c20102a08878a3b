//! The contact table schema: column name → rule kind, plus the structural
//! columns the pipeline depends on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::FieldKind;

/// Column the primary identity key is derived from.
pub const EMAIL_COLUMN: &str = "EMAIL";
/// Columns the fallback identity key is derived from.
pub const FULLNAME_COLUMN: &str = "FULLNAME";
pub const MOBILE_COLUMN: &str = "MOBILE";
/// Recency column used to order rows within an identity group.
pub const LAST_UPDATED_COLUMN: &str = "LAST_UPDATED";
/// Default sequence column, renumbered 1..N on output.
pub const SEQNO_COLUMN: &str = "SEQNO";

/// Schema for the merged contact export. The rule table is data: iterate it,
/// look names up in it, extend it. The normalizer has no per-column branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSchema {
    /// Column name → rule kind, in canonical column order.
    pub rules: IndexMap<String, FieldKind>,
    /// Columns that must be present in the input header.
    pub required: Vec<String>,
    /// Columns renumbered to 1..N after the merge.
    pub sequence_columns: Vec<String>,
}

impl ContactSchema {
    /// The schema of the MYOB EXO contact pull merged with the mailing-list
    /// and spreadsheet exports.
    pub fn contact_export() -> Self {
        let mut rules: IndexMap<String, FieldKind> = IndexMap::new();

        for name in ["SEQNO", "SALESNO", "COMPANY_ACCNO"] {
            rules.insert(name.to_string(), FieldKind::Integer);
        }
        for name in ["FIRSTNAME", "LASTNAME", "FULLNAME", "SALUTATION", "TITLE"] {
            rules.insert(name.to_string(), FieldKind::Name);
        }
        for name in ["EMAIL", "X_EMAIL2", "X_EMAIL3"] {
            rules.insert(name.to_string(), FieldKind::Email);
        }
        for name in [
            "MOBILE",
            "DIRECTPHONE",
            "HOMEPHONE",
            "X_PHONE1",
            "X_PHONE2",
            "X_PHONE3",
            "X_PHONE4",
            "X_PHONE5",
        ] {
            rules.insert(name.to_string(), FieldKind::Phone);
        }
        for i in 1..=6 {
            rules.insert(format!("ADDRESS{i}"), FieldKind::Address);
        }
        for name in ["POST_CODE", "X_REGION"] {
            rules.insert(name.to_string(), FieldKind::Address);
        }
        for name in [
            "LINKEDIN", "TWITTER", "FACEBOOK", "SKYPE_ID", "YAHOO_ID", "MSN_ID",
        ] {
            rules.insert(name.to_string(), FieldKind::Social);
        }
        rules.insert("LAST_UPDATED".to_string(), FieldKind::Date);
        for name in ["ISACTIVE", "SYNC_CONTACTS", "OPTOUT_EMARKETING"] {
            rules.insert(name.to_string(), FieldKind::Flag);
        }
        for i in 1..=26 {
            rules.insert(format!("SUB{i}"), FieldKind::Flag);
        }

        Self {
            rules,
            required: vec![
                EMAIL_COLUMN.to_string(),
                FULLNAME_COLUMN.to_string(),
                MOBILE_COLUMN.to_string(),
                LAST_UPDATED_COLUMN.to_string(),
                SEQNO_COLUMN.to_string(),
            ],
            sequence_columns: vec![SEQNO_COLUMN.to_string()],
        }
    }

    /// Look up the rule kind for a column. Unknown columns are plain text.
    pub fn kind_of(&self, column: &str) -> FieldKind {
        self.rules.get(column).copied().unwrap_or_default()
    }

    /// Add or override a column rule.
    pub fn with_rule(mut self, column: impl Into<String>, kind: FieldKind) -> Self {
        self.rules.insert(column.into(), kind);
        self
    }

    /// Designate an additional sequence column.
    pub fn with_sequence_column(mut self, column: impl Into<String>) -> Self {
        self.sequence_columns.push(column.into());
        self
    }

    /// Required columns absent from the given header, in schema order.
    pub fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        self.required
            .iter()
            .filter(|req| !headers.iter().any(|h| h == *req))
            .cloned()
            .collect()
    }
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self::contact_export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        let schema = ContactSchema::contact_export();
        assert_eq!(schema.kind_of("EMAIL"), FieldKind::Email);
        assert_eq!(schema.kind_of("X_PHONE3"), FieldKind::Phone);
        assert_eq!(schema.kind_of("SUB26"), FieldKind::Flag);
        assert_eq!(schema.kind_of("SALESNO"), FieldKind::Integer);
        assert_eq!(schema.kind_of("SOMETHING_ELSE"), FieldKind::Text);
    }

    #[test]
    fn test_missing_columns() {
        let schema = ContactSchema::contact_export();
        let headers = vec!["EMAIL".to_string(), "FULLNAME".to_string()];
        let missing = schema.missing_columns(&headers);
        assert_eq!(missing, vec!["MOBILE", "LAST_UPDATED", "SEQNO"]);
    }

    #[test]
    fn test_rule_override() {
        let schema = ContactSchema::contact_export().with_rule("NOTES", FieldKind::Text);
        assert_eq!(schema.kind_of("NOTES"), FieldKind::Text);
    }
}
