//! In-memory table of records loaded from a data file.

use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a record, derived from its position in the input.
///
/// The value is the 1-based ordinal of the record among the accepted data
/// rows. It never changes when records are reordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(usize);

impl RecordId {
    pub fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Anchor used to link to the record inside a report.
    pub fn anchor(self) -> String {
        format!("r{}", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One data row, keyed by property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    line: u64,
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: RecordId, line: u64, values: BTreeMap<String, String>) -> Self {
        Self { id, line, values }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Source line the record was read from.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Returns the value of a property, or `None` if the record has no such property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    /// Returns the value of a property, treating an unknown property as empty.
    pub fn value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    /// Returns true if the property has a non-empty value.
    pub fn has_value(&self, property: &str) -> bool {
        !self.value(property).is_empty()
    }
}

/// Ordered property names plus the records that carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    properties: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(properties: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            properties,
            records,
        }
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|property| property == name)
    }

    /// Position of a property in header order.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|property| property == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize, pairs: &[(&str, &str)]) -> Record {
        let values = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Record::new(RecordId::new(id), id as u64 + 1, values)
    }

    #[test]
    fn record_lookup_defaults_to_empty() {
        let rec = record(1, &[("foo", "1"), ("bar", "")]);
        assert_eq!(rec.get("foo"), Some("1"));
        assert_eq!(rec.get("missing"), None);
        assert_eq!(rec.value("missing"), "");
        assert!(rec.has_value("foo"));
        assert!(!rec.has_value("bar"));
    }

    #[test]
    fn record_id_anchor() {
        assert_eq!(RecordId::new(3).anchor(), "r3");
        assert_eq!(RecordId::new(3).to_string(), "3");
    }

    #[test]
    fn table_property_index() {
        let table = Table::new(
            vec!["foo".to_string(), "bar".to_string()],
            vec![record(1, &[("foo", "1"), ("bar", "2")])],
        );
        assert_eq!(table.property_index("bar"), Some(1));
        assert!(table.has_property("foo"));
        assert!(!table.has_property("baz"));
        assert_eq!(table.len(), 1);
    }
}
