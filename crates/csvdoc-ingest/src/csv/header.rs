//! Header row validation.

use std::collections::BTreeSet;

use crate::error::{IngestError, Result};

use super::reader::SourceRow;

/// Line the header is reported on, independent of where the reader found it.
pub const HEADER_LINE: u64 = 1;

/// Extracts property names from the header row.
///
/// Names must be non-blank and unique. Blank fields are tolerated only as a
/// trailing run (spreadsheet exports pad rows with empty columns); that run
/// is dropped.
pub fn parse_header(row: Option<&SourceRow>) -> Result<Vec<String>> {
    let Some(row) = row else {
        return Err(header_error("missing header row"));
    };
    let width = row
        .fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |idx| idx + 1);
    if width == 0 {
        return Err(header_error("header row has no property names"));
    }
    let names = &row.fields[..width];
    if let Some(blank) = names.iter().position(String::is_empty) {
        return Err(header_error(format!(
            "column {} has a blank name but later columns are named",
            blank + 1
        )));
    }
    let mut seen = BTreeSet::new();
    for (idx, name) in names.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            return Err(header_error(format!(
                "column {} repeats property name '{name}'",
                idx + 1
            )));
        }
    }
    Ok(names.to_vec())
}

fn header_error(message: impl Into<String>) -> IngestError {
    IngestError::Header {
        line: HEADER_LINE,
        message: message.into(),
    }
}
