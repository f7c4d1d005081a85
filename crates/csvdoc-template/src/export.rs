//! Writing a display specification back out as template CSV.

use std::io::Write;

use csv::WriterBuilder;
use csvdoc_model::constants::{
    CMD_HIDE, CMD_IDENTIFIER, CMD_OTHER, CMD_SHOW, CMD_SORT, CMD_SUBTITLE, CMD_TITLE,
    COMMAND_MARKER, COMMENT_MARKER, LIST_SEPARATOR,
};
use csvdoc_model::{
    DisplayItem, DisplaySpec, Enumeration, PropertyItem, Section, SectionVisibility,
};

use crate::enumeration::format_enumeration;
use crate::error::{Result, TemplateError};

/// Header row written at the top of exported templates.
pub const TEMPLATE_HEADER: [&str; 4] = ["Label", "Property", "Enumeration", "Notes"];

/// Writes `spec` as template CSV that parses back to an equal specification.
///
/// Visibility is written only when it differs from the default. A top-level
/// label that starts with a template marker is written blank when it equals
/// its property, since a blank label reads back as the property name. Any
/// other label starting with a marker fails with [`TemplateError::Write`].
pub fn write_template<W: Write>(writer: W, spec: &DisplaySpec) -> Result<()> {
    let mut out = WriterBuilder::new().flexible(true).from_writer(writer);
    let mut emit = |fields: [&str; 4]| {
        out.write_record(fields).map_err(|e| TemplateError::Write {
            message: e.to_string(),
        })
    };

    emit(TEMPLATE_HEADER)?;
    if let Some(title) = &spec.title {
        emit([command(CMD_TITLE).as_str(), title.as_str(), "", ""])?;
    }
    if let Some(subtitle) = &spec.subtitle {
        emit([command(CMD_SUBTITLE).as_str(), subtitle.as_str(), "", ""])?;
    }
    for property in &spec.sort_properties {
        emit([command(CMD_SORT).as_str(), property.as_str(), "", ""])?;
    }
    for property in &spec.identifier_properties {
        emit([command(CMD_IDENTIFIER).as_str(), property.as_str(), "", ""])?;
    }
    if let Some(list) = show_list(spec) {
        emit([command(CMD_SHOW).as_str(), list.as_str(), "", ""])?;
    }
    for item in &spec.items {
        match item {
            DisplayItem::Scalar(scalar) => {
                let label = top_level_label(&scalar.label, &scalar.property)?;
                let enumeration = enumeration_text(scalar.enumeration.as_ref());
                emit([
                    label,
                    scalar.property.as_str(),
                    enumeration.as_str(),
                    scalar.notes.as_str(),
                ])?;
            }
            DisplayItem::Group(group) => {
                emit([plain_label(&group.label)?, "", "", ""])?;
                for member in &group.members {
                    let enumeration = enumeration_text(member.enumeration.as_ref());
                    emit([
                        plain_label(&member.label)?,
                        member.property.as_str(),
                        enumeration.as_str(),
                        member.notes.as_str(),
                    ])?;
                }
                emit(["", "", "", ""])?;
            }
            DisplayItem::Other(other) => {
                let [name, property, enumeration, notes] = property_row(CMD_OTHER, other);
                emit([name.as_str(), property.as_str(), enumeration.as_str(), notes.as_str()])?;
            }
            DisplayItem::Hidden(hidden) => {
                let [name, property, enumeration, notes] = property_row(CMD_HIDE, hidden);
                emit([name.as_str(), property.as_str(), enumeration.as_str(), notes.as_str()])?;
            }
        }
    }
    out.flush().map_err(|e| TemplateError::Write {
        message: e.to_string(),
    })
}

fn command(name: &str) -> String {
    format!("{COMMAND_MARKER}{name}")
}

fn starts_with_marker(text: &str) -> bool {
    text.starts_with(COMMAND_MARKER) || text.starts_with(COMMENT_MARKER)
}

fn plain_label(label: &str) -> Result<&str> {
    if starts_with_marker(label) {
        Err(TemplateError::Write {
            message: format!("label '{label}' starts with a template marker"),
        })
    } else {
        Ok(label)
    }
}

fn top_level_label<'a>(label: &'a str, property: &str) -> Result<&'a str> {
    if starts_with_marker(label) && label == property {
        Ok("")
    } else {
        plain_label(label)
    }
}

fn enumeration_text(enumeration: Option<&Enumeration>) -> String {
    enumeration.map(format_enumeration).unwrap_or_default()
}

fn property_row(name: &str, item: &PropertyItem) -> [String; 4] {
    [
        command(name),
        item.property.clone(),
        enumeration_text(item.enumeration.as_ref()),
        item.notes.clone(),
    ]
}

fn show_list(spec: &DisplaySpec) -> Option<String> {
    let visibility = spec.visibility;
    if visibility == SectionVisibility::all() {
        return None;
    }
    let names: Vec<&str> = [
        (visibility.records, Section::Records),
        (visibility.contents, Section::Contents),
        (visibility.properties, Section::Properties),
        (visibility.index, Section::Index),
    ]
    .into_iter()
    .filter(|(shown, _)| *shown)
    .map(|(_, section)| section.as_str())
    .collect();
    if names.is_empty() {
        // A lone separator names no section.
        return Some(LIST_SEPARATOR.to_string());
    }
    let separator = LIST_SEPARATOR.to_string();
    Some(names.join(separator.as_str()))
}
