//! Display specification produced by the template parser.

use std::fmt;

use serde::Serialize;

use crate::constants::{
    CATEGORY_HIDDEN, CATEGORY_NORMAL, CATEGORY_OTHER, CATEGORY_UNEXPECTED, SECTION_ALL,
    SECTION_CONTENTS, SECTION_INDEX, SECTION_PROPERTIES, SECTION_RECORDS,
};
use crate::enumeration::Enumeration;

/// A single property rendered as a labeled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarItem {
    pub property: String,
    pub label: String,
    pub enumeration: Option<Enumeration>,
    pub notes: String,
}

/// A labeled cluster of scalars rendered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub label: String,
    pub members: Vec<ScalarItem>,
}

/// A property that is listed by name only (`_OTHER` / `_HIDE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyItem {
    pub property: String,
    pub enumeration: Option<Enumeration>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayItem {
    Scalar(ScalarItem),
    Group(GroupItem),
    /// Shown in the properties section only.
    Other(PropertyItem),
    /// Shown in neither section unless hidden properties are requested.
    Hidden(PropertyItem),
}

impl DisplayItem {
    /// Every property name the item refers to, in template order.
    pub fn properties(&self) -> Vec<&str> {
        match self {
            DisplayItem::Scalar(scalar) => vec![scalar.property.as_str()],
            DisplayItem::Group(group) => group
                .members
                .iter()
                .map(|member| member.property.as_str())
                .collect(),
            DisplayItem::Other(item) | DisplayItem::Hidden(item) => vec![item.property.as_str()],
        }
    }
}

/// Which report sections are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionVisibility {
    pub records: bool,
    pub contents: bool,
    pub properties: bool,
    pub index: bool,
}

impl SectionVisibility {
    pub fn all() -> Self {
        Self {
            records: true,
            contents: true,
            properties: true,
            index: true,
        }
    }

    pub fn none() -> Self {
        Self {
            records: false,
            contents: false,
            properties: false,
            index: false,
        }
    }

    /// Turns on the flag(s) selected by a section name.
    pub fn enable(&mut self, section: Section) {
        match section {
            Section::Records => self.records = true,
            Section::Contents => self.contents = true,
            Section::Properties => self.properties = true,
            Section::Index => self.index = true,
            Section::All => *self = Self::all(),
        }
    }
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self::all()
    }
}

/// Section names accepted by `_SHOW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Records,
    Contents,
    Properties,
    Index,
    All,
}

impl Section {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            SECTION_RECORDS => Some(Section::Records),
            SECTION_CONTENTS => Some(Section::Contents),
            SECTION_PROPERTIES => Some(Section::Properties),
            SECTION_INDEX => Some(Section::Index),
            SECTION_ALL => Some(Section::All),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Records => SECTION_RECORDS,
            Section::Contents => SECTION_CONTENTS,
            Section::Properties => SECTION_PROPERTIES,
            Section::Index => SECTION_INDEX,
            Section::All => SECTION_ALL,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a property is classified in the properties section and its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Normal,
    Other,
    Hidden,
    /// Present in the data but not referenced by the template.
    Unexpected,
}

impl PropertyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyCategory::Normal => CATEGORY_NORMAL,
            PropertyCategory::Other => CATEGORY_OTHER,
            PropertyCategory::Hidden => CATEGORY_HIDDEN,
            PropertyCategory::Unexpected => CATEGORY_UNEXPECTED,
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed template: what to show, in which order, and how records are titled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySpec {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sort_properties: Vec<String>,
    pub identifier_properties: Vec<String>,
    pub items: Vec<DisplayItem>,
    pub visibility: SectionVisibility,
}

impl DisplaySpec {
    /// All property names referenced by items, sort keys and identifier keys.
    ///
    /// Items come first in template order, then sort keys, then identifiers.
    /// Names may repeat.
    pub fn referenced_properties(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .items
            .iter()
            .flat_map(DisplayItem::properties)
            .collect();
        names.extend(self.sort_properties.iter().map(String::as_str));
        names.extend(self.identifier_properties.iter().map(String::as_str));
        names
    }

    pub fn references(&self, property: &str) -> bool {
        self.referenced_properties().contains(&property)
    }
}
