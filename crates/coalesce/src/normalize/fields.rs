//! Pure per-field normalizers.
//!
//! Each function takes one raw cell and returns `Some(normalized)` or `None`
//! when the value is invalid for its kind. None renders as the empty string
//! downstream. No function here looks at more than one cell.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::DataTable;
use crate::schema::FieldKind;

/// Minimum digit count for a phone number to be considered usable.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Canonical render format for dates. Kept first in `DATE_FORMATS` so that
/// re-running the pipeline on its own output re-parses every date unchanged.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input formats, tried in order; the bool marks formats that carry
/// a time component. Day-first formats precede month-first because the
/// accounting exports are day-first.
const DATE_FORMATS: &[(&str, bool)] = &[
    (CANONICAL_DATE_FORMAT, true),
    ("%Y-%m-%dT%H:%M:%S", true),
    ("%Y-%m-%d", false),
    ("%d/%m/%Y %H:%M", true),
    ("%d/%m/%Y", false),
    ("%m/%d/%Y", false),
];

/// Local-part "@" domain, with at least one dot in the domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Normalize one cell according to its column kind. `None` means the value
/// was invalid and is nulled; integer and text kinds never null a non-missing
/// value.
pub fn normalize_field(kind: FieldKind, raw: &str) -> Option<String> {
    if DataTable::is_null_value(raw) {
        return None;
    }
    match kind {
        FieldKind::Email => normalize_email(raw),
        FieldKind::Phone => normalize_phone(raw),
        FieldKind::Name => normalize_name(raw),
        FieldKind::Address => normalize_address(raw),
        FieldKind::Social => normalize_social(raw),
        FieldKind::Date => normalize_date(raw),
        FieldKind::Flag => normalize_flag(raw),
        FieldKind::Integer => Some(normalize_integer(raw)),
        FieldKind::Text => Some(raw.trim().to_string()),
    }
}

/// Trim, lowercase, verify syntactic shape.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    EMAIL_RE.is_match(&email).then_some(email)
}

/// Strip everything but digits; below the minimum digit count → null.
/// The digit string is kept as-is, no re-formatting.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() >= MIN_PHONE_DIGITS).then_some(digits)
}

/// Collapse internal whitespace and title-case. Word segments separated by
/// hyphens or apostrophes are capitalized independently, so "mary-jane
/// o'brien" becomes "Mary-Jane O'Brien".
pub fn normalize_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    let cased = collapsed
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");
    Some(cased)
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_segment_start = true;
    for ch in word.chars() {
        if ch == '-' || ch == '\'' {
            out.push(ch);
            at_segment_start = true;
        } else if at_segment_start {
            // One capital per segment: when uppercasing expands to several
            // characters (e.g. the sharp s), the tail is folded back to
            // lowercase so a second pass reproduces the same output.
            let mut upper = ch.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
            at_segment_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Trim only; case and internal spacing preserved.
pub fn normalize_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim and lowercase (handles, profile slugs).
pub fn normalize_social(raw: &str) -> Option<String> {
    let handle = raw.trim().to_lowercase();
    (!handle.is_empty()).then_some(handle)
}

/// Parse against the accepted format list; first success wins.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for &(format, has_time) in DATE_FORMATS {
        if has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(dt);
            }
        } else if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        }
    }
    None
}

/// Render a parsed date in the canonical format; unparsable → null.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|dt| dt.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Only a literal Y or N (any case) survives.
pub fn normalize_flag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("y") {
        Some("Y".to_string())
    } else if trimmed.eq_ignore_ascii_case("n") {
        Some("N".to_string())
    } else {
        None
    }
}

/// Valid integer literals are rendered canonically; anything else passes
/// through verbatim so non-numeric upstream identifiers survive.
pub fn normalize_integer(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => trimmed.to_string(),
    }
}
