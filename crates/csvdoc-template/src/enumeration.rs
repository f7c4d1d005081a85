//! Parser for `key=value;key=value` enumeration strings.

use std::collections::BTreeSet;

use csvdoc_model::Enumeration;
use csvdoc_model::constants::{ENUMERATION_ASSIGN, LIST_SEPARATOR};

use crate::error::EnumerationError;

/// Parses an enumeration, returning `None` for blank input.
///
/// Keys and labels are trimmed. Empty segments (for instance after a trailing
/// separator) are skipped. Only the first `=` splits an entry, so labels may
/// contain `=`.
pub fn parse_enumeration(text: &str) -> Result<Option<Enumeration>, EnumerationError> {
    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();
    for segment in text.split(LIST_SEPARATOR) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((key, label)) = segment.split_once(ENUMERATION_ASSIGN) else {
            return Err(EnumerationError::Malformed {
                entry: segment.to_string(),
            });
        };
        let key = key.trim();
        if !seen.insert(key.to_string()) {
            return Err(EnumerationError::DuplicateKey {
                key: key.to_string(),
            });
        }
        entries.push((key.to_string(), label.trim().to_string()));
    }
    Ok(Enumeration::from_entries(entries))
}

/// Formats an enumeration back into its `key=value;key=value` form.
pub fn format_enumeration(enumeration: &Enumeration) -> String {
    let mut out = String::new();
    for (idx, (key, label)) in enumeration.entries().enumerate() {
        if idx > 0 {
            out.push(LIST_SEPARATOR);
        }
        out.push_str(key);
        out.push(ENUMERATION_ASSIGN);
        out.push_str(label);
    }
    out
}
