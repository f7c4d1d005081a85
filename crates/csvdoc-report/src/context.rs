//! Validated inputs shared by the section writers.

use csvdoc_model::constants::UNTITLED;
use csvdoc_model::{DisplaySpec, Enumeration, Record, ReportWarning, Table};
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::order::sort_records;

const CONTEXT_SEPARATOR: &str = " / ";

pub(crate) struct ReportContext<'a> {
    pub table: &'a Table,
    pub spec: &'a DisplaySpec,
    pub options: &'a RenderOptions,
    /// Records in display order.
    pub records: Vec<&'a Record>,
}

impl<'a> ReportContext<'a> {
    /// Checks every referenced property against the table and orders the records.
    pub fn new(table: &'a Table, spec: &'a DisplaySpec, options: &'a RenderOptions) -> Result<Self> {
        validate_references(table, spec)?;
        let records = sort_records(table.records(), &spec.sort_properties);
        debug!(
            records = records.len(),
            sort_keys = spec.sort_properties.len(),
            "ordered records"
        );
        Ok(Self {
            table,
            spec,
            options,
            records,
        })
    }

    pub fn title(&self) -> &'a str {
        self.spec
            .title
            .as_deref()
            .unwrap_or(self.options.default_title.as_str())
    }

    /// Non-empty identifier values of a record, in identifier order.
    pub fn identifier_values(&self, record: &'a Record) -> Vec<&'a str> {
        self.spec
            .identifier_properties
            .iter()
            .map(|property| record.value(property))
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Joined identifier values, or the untitled placeholder.
    pub fn record_label(&self, record: &'a Record) -> String {
        let values = self.identifier_values(record);
        if values.is_empty() {
            UNTITLED.to_string()
        } else {
            values.join(CONTEXT_SEPARATOR)
        }
    }

    /// Splits identifier values into a context line and a heading.
    pub fn record_heading(&self, record: &'a Record) -> (Option<String>, &'a str) {
        let values = self.identifier_values(record);
        match values.split_last() {
            None => (None, UNTITLED),
            Some((last, [])) => (None, *last),
            Some((last, rest)) => (Some(rest.join(CONTEXT_SEPARATOR)), *last),
        }
    }

    pub fn property_anchor(&self, property: &str) -> Option<String> {
        self.table
            .property_index(property)
            .map(|index| format!("p{index}"))
    }
}

fn validate_references(table: &Table, spec: &DisplaySpec) -> Result<()> {
    match spec
        .referenced_properties()
        .into_iter()
        .find(|property| !table.has_property(property))
    {
        Some(property) => Err(RenderError::PropertyNotInData {
            property: property.to_string(),
        }),
        None => Ok(()),
    }
}

/// Maps a raw value through an optional enumeration.
///
/// Empty values and properties without an enumeration pass through. A value
/// the enumeration does not know is shown raw alongside a warning.
pub(crate) fn display_value<'v>(
    property: &str,
    raw: &'v str,
    enumeration: Option<&'v Enumeration>,
) -> (&'v str, Option<ReportWarning>) {
    let Some(enumeration) = enumeration else {
        return (raw, None);
    };
    if raw.is_empty() {
        return (raw, None);
    }
    match enumeration.get(raw) {
        Some(shown) => (shown, None),
        None => (
            raw,
            Some(ReportWarning::MissingEnumerationEntry {
                property: property.to_string(),
                value: raw.to_string(),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use csvdoc_model::{DisplayItem, RecordId, ScalarItem, SectionVisibility};

    use super::*;

    fn table() -> Table {
        let properties = vec!["last".to_string(), "first".to_string(), "dept".to_string()];
        let rows = [("Smith", "Ann", "Ops"), ("", "", "Ops"), ("Jones", "", "")];
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, (last, first, dept))| {
                let mut values = BTreeMap::new();
                values.insert("last".to_string(), (*last).to_string());
                values.insert("first".to_string(), (*first).to_string());
                values.insert("dept".to_string(), (*dept).to_string());
                Record::new(RecordId::new(idx + 1), idx as u64 + 2, values)
            })
            .collect();
        Table::new(properties, records)
    }

    fn spec(identifiers: &[&str]) -> DisplaySpec {
        DisplaySpec {
            title: None,
            subtitle: None,
            sort_properties: Vec::new(),
            identifier_properties: identifiers.iter().map(|p| (*p).to_string()).collect(),
            items: vec![DisplayItem::Scalar(ScalarItem {
                property: "last".to_string(),
                label: "Last".to_string(),
                enumeration: None,
                notes: String::new(),
            })],
            visibility: SectionVisibility::all(),
        }
    }

    #[test]
    fn heading_splits_context_from_last_value() {
        let table = table();
        let spec = spec(&["dept", "first", "last"]);
        let options = RenderOptions::new("t");
        let ctx = ReportContext::new(&table, &spec, &options).unwrap();
        let records = table.records();
        assert_eq!(
            ctx.record_heading(&records[0]),
            (Some("Ops / Ann".to_string()), "Smith")
        );
        assert_eq!(ctx.record_heading(&records[1]), (None, "Ops"));
        assert_eq!(ctx.record_label(&records[2]), "Jones");
    }

    #[test]
    fn record_without_identifier_values_is_untitled() {
        let table = table();
        let spec = spec(&["first"]);
        let options = RenderOptions::new("t");
        let ctx = ReportContext::new(&table, &spec, &options).unwrap();
        let record = &table.records()[1];
        assert_eq!(ctx.record_heading(record), (None, UNTITLED));
        assert_eq!(ctx.record_label(record), UNTITLED);
    }

    #[test]
    fn first_missing_reference_is_reported() {
        let table = table();
        let mut spec = spec(&["ghost"]);
        spec.sort_properties.push("phantom".to_string());
        let options = RenderOptions::new("t");
        let err = ReportContext::new(&table, &spec, &options).err().unwrap();
        // Sort keys are checked before identifiers.
        assert!(matches!(
            err,
            RenderError::PropertyNotInData { ref property } if property == "phantom"
        ));
    }

    #[test]
    fn anchors_follow_property_order() {
        let table = table();
        let spec = spec(&["last"]);
        let options = RenderOptions::new("t");
        let ctx = ReportContext::new(&table, &spec, &options).unwrap();
        assert_eq!(ctx.property_anchor("dept").as_deref(), Some("p2"));
        assert_eq!(ctx.property_anchor("ghost"), None);
    }

    #[test]
    fn title_falls_back_to_default() {
        let table = table();
        let mut spec = spec(&["last"]);
        let options = RenderOptions::new("staff");
        let ctx = ReportContext::new(&table, &spec, &options).unwrap();
        assert_eq!(ctx.title(), "staff");
        spec.title = Some("Staff list".to_string());
        let ctx = ReportContext::new(&table, &spec, &options).unwrap();
        assert_eq!(ctx.title(), "Staff list");
    }

    #[test]
    fn display_value_applies_enumeration() {
        let enumeration = Enumeration::from_entries(vec![
            ("0".to_string(), "off".to_string()),
            ("1".to_string(), "on".to_string()),
        ]);
        let enumeration = enumeration.as_ref();
        assert_eq!(display_value("status", "1", enumeration), ("on", None));
        assert_eq!(display_value("status", "", enumeration), ("", None));
        let (shown, warning) = display_value("status", "2", enumeration);
        assert_eq!(shown, "2");
        assert_eq!(
            warning,
            Some(ReportWarning::MissingEnumerationEntry {
                property: "status".to_string(),
                value: "2".to_string(),
            })
        );
        assert_eq!(display_value("status", "2", None), ("2", None));
    }
}
