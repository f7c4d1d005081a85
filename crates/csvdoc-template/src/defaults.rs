//! Templates derived from the data itself.

use csvdoc_model::{DisplayItem, DisplaySpec, ScalarItem, SectionVisibility, Table};

/// Synthesizes the template used when none is supplied.
///
/// Every property becomes a scalar labeled with its own name, in header
/// order. The first property identifies records; there are no sort keys.
pub fn default_template(table: &Table) -> DisplaySpec {
    let items = table
        .properties()
        .iter()
        .map(|property| {
            DisplayItem::Scalar(ScalarItem {
                property: property.clone(),
                label: property.clone(),
                enumeration: None,
                notes: String::new(),
            })
        })
        .collect();
    DisplaySpec {
        title: None,
        subtitle: None,
        sort_properties: Vec::new(),
        identifier_properties: table.properties().iter().take(1).cloned().collect(),
        items,
        visibility: SectionVisibility::all(),
    }
}

/// Data properties the template never mentions, in header order.
pub fn unused_properties<'a>(table: &'a Table, spec: &DisplaySpec) -> Vec<&'a str> {
    let referenced = spec.referenced_properties();
    table
        .properties()
        .iter()
        .map(String::as_str)
        .filter(|property| !referenced.contains(property))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvdoc_model::PropertyItem;

    fn table(properties: &[&str]) -> Table {
        Table::new(
            properties.iter().map(|p| (*p).to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn default_template_lists_properties_in_order() {
        let spec = default_template(&table(&["A", "B"]));
        let properties: Vec<Vec<&str>> = spec.items.iter().map(DisplayItem::properties).collect();
        assert_eq!(properties, vec![vec!["A"], vec!["B"]]);
        assert_eq!(spec.identifier_properties, vec!["A".to_string()]);
        assert!(spec.sort_properties.is_empty());
        assert_eq!(spec.visibility, SectionVisibility::all());
        let DisplayItem::Scalar(first) = &spec.items[0] else {
            panic!("expected scalar");
        };
        assert_eq!(first.label, "A");
        assert!(first.enumeration.is_none());
    }

    #[test]
    fn unused_properties_in_data_order() {
        let data = table(&["name", "extra", "secret", "more"]);
        let mut spec = default_template(&table(&["name"]));
        spec.items.push(DisplayItem::Hidden(PropertyItem {
            property: "secret".to_string(),
            enumeration: None,
            notes: String::new(),
        }));
        assert_eq!(unused_properties(&data, &spec), vec!["extra", "more"]);
    }

    #[test]
    fn sort_and_identifier_keys_count_as_references() {
        let data = table(&["name", "date"]);
        let mut spec = default_template(&table(&["name"]));
        spec.sort_properties.push("date".to_string());
        assert!(unused_properties(&data, &spec).is_empty());
    }
}
