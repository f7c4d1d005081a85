//! Record ordering by sort keys.

use std::cmp::Ordering;

use csvdoc_model::Record;

/// Returns the records ordered by `keys`.
///
/// For each key, empty values come after non-empty ones and non-empty values
/// compare ordinally. The first differing key decides; records that tie on
/// every key keep their input order. With no keys the input order is kept.
pub fn sort_records<'a>(records: &'a [Record], keys: &[String]) -> Vec<&'a Record> {
    let mut ordered: Vec<&Record> = records.iter().collect();
    if !keys.is_empty() {
        // `sort_by` is stable.
        ordered.sort_by(|a, b| compare_records(a, b, keys));
    }
    ordered
}

pub fn compare_records(a: &Record, b: &Record, keys: &[String]) -> Ordering {
    keys.iter()
        .map(|key| compare_values(a.value(key), b.value(key)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}
