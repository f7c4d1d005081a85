use serde::Serialize;

/// Lookup table from raw values to display labels.
///
/// Never empty: a template item without entries carries no enumeration at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    entries: Vec<(String, String)>,
}

impl Enumeration {
    /// Builds an enumeration from ordered entries, returning `None` when there are none.
    pub fn from_entries(entries: Vec<(String, String)>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == raw)
            .map(|(_, label)| label.as_str())
    }

    pub fn contains_key(&self, raw: &str) -> bool {
        self.get(raw).is_some()
    }

    /// Entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
