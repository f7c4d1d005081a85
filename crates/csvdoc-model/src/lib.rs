//! Shared data model for csvdoc.
//!
//! - [`Table`] / [`Record`]: rows loaded from a data file
//! - [`DisplaySpec`] / [`DisplayItem`]: what a template asks the report to show
//! - [`ReportWarning`]: non-fatal findings handed back by the renderer

pub mod constants;
pub mod display;
pub mod enumeration;
pub mod table;
pub mod warning;

pub use display::{
    DisplayItem, DisplaySpec, GroupItem, PropertyCategory, PropertyItem, ScalarItem, Section,
    SectionVisibility,
};
pub use enumeration::Enumeration;
pub use table::{Record, RecordId, Table};
pub use warning::ReportWarning;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_serializes_with_kind_tag() {
        let warning = ReportWarning::MissingEnumerationEntry {
            property: "status".to_string(),
            value: "2".to_string(),
        };
        let json = serde_json::to_value(&warning).expect("serialize warning");
        assert_eq!(json["kind"], "missing_enumeration_entry");
        assert_eq!(json["property"], "status");
        assert_eq!(json["value"], "2");
    }

    #[test]
    fn warning_messages() {
        let unreferenced = ReportWarning::UnreferencedProperty {
            property: "extra".to_string(),
        };
        assert_eq!(
            unreferenced.to_string(),
            "property 'extra' is not referenced by the template"
        );
        let missing = ReportWarning::MissingEnumerationEntry {
            property: "status".to_string(),
            value: "2".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "no enumeration entry for value '2' of property 'status'"
        );
        assert_eq!(missing.property(), "status");
    }
}
