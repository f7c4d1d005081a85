use std::fmt;

use serde::Serialize;

/// Non-fatal finding collected while rendering a report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// The data has a property that the template never mentions.
    UnreferencedProperty { property: String },
    /// A value was observed that the property's enumeration does not list.
    MissingEnumerationEntry { property: String, value: String },
}

impl ReportWarning {
    pub fn property(&self) -> &str {
        match self {
            ReportWarning::UnreferencedProperty { property }
            | ReportWarning::MissingEnumerationEntry { property, .. } => property,
        }
    }
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::UnreferencedProperty { property } => {
                write!(f, "property '{property}' is not referenced by the template")
            }
            ReportWarning::MissingEnumerationEntry { property, value } => write!(
                f,
                "no enumeration entry for value '{value}' of property '{property}'"
            ),
        }
    }
}
