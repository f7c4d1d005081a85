//! Loading tokenized rows into a [`Table`].

use std::collections::BTreeMap;
use std::path::Path;

use csvdoc_model::{Record, RecordId, Table};
use tracing::{debug, trace};

use crate::csv::{SourceRow, parse_header, read_rows_from_path};
use crate::error::{IngestError, Result};

/// Builds a table from tokenized rows; the first row is the header.
///
/// Short rows are padded with empty values. Fields beyond the header width
/// must be blank. Rows without any non-blank value are dropped.
pub fn load_table(rows: &[SourceRow]) -> Result<Table> {
    let properties = parse_header(rows.first())?;
    let mut records = Vec::new();
    for row in rows.iter().skip(1) {
        if let Some(found) = excess_width(row, properties.len()) {
            return Err(IngestError::RowFieldCount {
                line: row.line,
                expected: properties.len(),
                found,
            });
        }
        if row.is_blank() {
            trace!(line = row.line, "skipping blank row");
            continue;
        }
        let values: BTreeMap<String, String> = properties
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), row.field(idx).to_string()))
            .collect();
        let id = RecordId::new(records.len() + 1);
        records.push(Record::new(id, row.line, values));
    }
    debug!(
        properties = properties.len(),
        records = records.len(),
        "loaded table"
    );
    Ok(Table::new(properties, records))
}

/// Reads and loads a data file.
pub fn read_table(path: &Path) -> Result<Table> {
    let rows = read_rows_from_path(path)?;
    load_table(&rows)
}

/// Width of the row up to its last non-blank field, if that exceeds `width`.
fn excess_width(row: &SourceRow, width: usize) -> Option<usize> {
    let used = row
        .fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |idx| idx + 1);
    (used > width).then_some(used)
}
