//! Template row classification and the group state machine.
//!
//! Parsing runs in three steps per row:
//!
//! 1. [`classify_row`] turns a [`SourceRow`] into a [`TemplateRow`] without
//!    looking at any state.
//! 2. [`ParseState::advance`] feeds the classified row into the `Idle` /
//!    `InGroup` state machine and yields the [`Effect`]s the row completes.
//! 3. A builder applies the effects to the display specification under
//!    construction.

use std::path::Path;

use csvdoc_ingest::{BlankLines, SourceRow, read_rows_from_path_with, read_rows_with};
use csvdoc_model::constants::{
    CMD_HIDE, CMD_IDENTIFIER, CMD_OTHER, CMD_SHOW, CMD_SORT, CMD_SUBTITLE, CMD_TITLE,
    COMMAND_MARKER, COMMENT_MARKER, LIST_SEPARATOR, MAX_TEMPLATE_FIELDS,
};
use csvdoc_model::{
    DisplayItem, DisplaySpec, GroupItem, PropertyItem, ScalarItem, Section, SectionVisibility,
};
use tracing::{debug, trace, warn};

use crate::enumeration::parse_enumeration;
use crate::error::{Result, TemplateError};

/// A template command row (`_TITLE`, `_SORT`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Subtitle(String),
    Sort(String),
    Identifier(String),
    Other(PropertyItem),
    Hide(PropertyItem),
    Show(SectionVisibility),
}

/// A template row after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRow {
    Comment,
    Command(Command),
    /// Every field blank; closes an open group.
    Blank,
    GroupStart { label: String },
    /// A scalar item. The label is left blank if the row had none.
    Item(ScalarItem),
    /// Blank label and property but other fields set.
    Ignored,
}

/// Classifies one template row.
pub fn classify_row(row: &SourceRow) -> Result<TemplateRow> {
    let first = row.field(0);
    if first.starts_with(COMMENT_MARKER) {
        return Ok(TemplateRow::Comment);
    }
    if row.fields.len() > MAX_TEMPLATE_FIELDS {
        return Err(TemplateError::TooManyFields {
            line: row.line,
            found: row.fields.len(),
            max: MAX_TEMPLATE_FIELDS,
        });
    }
    if first.starts_with(COMMAND_MARKER) {
        return parse_command(row).map(TemplateRow::Command);
    }
    if row.is_blank() {
        return Ok(TemplateRow::Blank);
    }
    let property = row.field(1);
    if property.is_empty() {
        if first.is_empty() {
            return Ok(TemplateRow::Ignored);
        }
        return Ok(TemplateRow::GroupStart {
            label: first.to_string(),
        });
    }
    Ok(TemplateRow::Item(ScalarItem {
        property: property.to_string(),
        label: first.to_string(),
        enumeration: parse_enumeration(row.field(2)).map_err(|e| e.at_line(row.line))?,
        notes: row.field(3).to_string(),
    }))
}

fn parse_command(row: &SourceRow) -> Result<Command> {
    let token = row.field(0);
    let name = &token[COMMAND_MARKER.len_utf8()..];
    let parameter = || -> Result<String> {
        let value = row.field(1);
        if value.is_empty() {
            Err(TemplateError::MissingParameter {
                line: row.line,
                command: token.to_string(),
            })
        } else {
            Ok(value.to_string())
        }
    };
    let property_item = || -> Result<PropertyItem> {
        Ok(PropertyItem {
            property: parameter()?,
            enumeration: parse_enumeration(row.field(2)).map_err(|e| e.at_line(row.line))?,
            notes: row.field(3).to_string(),
        })
    };
    match name {
        CMD_TITLE => Ok(Command::Title(parameter()?)),
        CMD_SUBTITLE => Ok(Command::Subtitle(parameter()?)),
        CMD_SORT => Ok(Command::Sort(parameter()?)),
        CMD_IDENTIFIER => Ok(Command::Identifier(parameter()?)),
        CMD_OTHER => Ok(Command::Other(property_item()?)),
        CMD_HIDE => Ok(Command::Hide(property_item()?)),
        CMD_SHOW => parse_show(&parameter()?, row.line).map(Command::Show),
        _ => Err(TemplateError::UnknownCommand {
            line: row.line,
            command: token.to_string(),
        }),
    }
}

/// Parses a `_SHOW` list into a fresh set of visibility flags.
fn parse_show(list: &str, line: u64) -> Result<SectionVisibility> {
    let mut visibility = SectionVisibility::none();
    for name in list.split(LIST_SEPARATOR).map(str::trim) {
        if name.is_empty() {
            continue;
        }
        let section = Section::from_name(name).ok_or_else(|| TemplateError::UnknownShowValue {
            line,
            value: name.to_string(),
        })?;
        visibility.enable(section);
    }
    Ok(visibility)
}

/// Something a row completes: a finished item or a command to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Item(DisplayItem),
    Command(Command),
}

/// Whether a group is being accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParseState {
    #[default]
    Idle,
    InGroup(GroupItem),
}

impl ParseState {
    /// Feeds one classified row and returns the next state plus its effects.
    ///
    /// Comments leave the state untouched. Commands, blank rows and new group
    /// labels close an open group before doing anything else.
    pub fn advance(self, row: TemplateRow) -> (ParseState, Vec<Effect>) {
        match row {
            TemplateRow::Comment | TemplateRow::Ignored => (self, Vec::new()),
            TemplateRow::Command(command) => {
                let mut effects = self.close_effects();
                effects.push(Effect::Command(command));
                (ParseState::Idle, effects)
            }
            TemplateRow::Blank => (ParseState::Idle, self.close_effects()),
            TemplateRow::GroupStart { label } => {
                let effects = self.close_effects();
                let group = GroupItem {
                    label,
                    members: Vec::new(),
                };
                (ParseState::InGroup(group), effects)
            }
            TemplateRow::Item(mut scalar) => match self {
                ParseState::Idle => {
                    if scalar.label.is_empty() {
                        scalar.label = scalar.property.clone();
                    }
                    (
                        ParseState::Idle,
                        vec![Effect::Item(DisplayItem::Scalar(scalar))],
                    )
                }
                ParseState::InGroup(mut group) => {
                    group.members.push(scalar);
                    (ParseState::InGroup(group), Vec::new())
                }
            },
        }
    }

    /// Closes an open group, returning it as an item.
    pub fn close(self) -> Option<DisplayItem> {
        match self {
            ParseState::Idle => None,
            ParseState::InGroup(group) => Some(DisplayItem::Group(group)),
        }
    }

    fn close_effects(self) -> Vec<Effect> {
        self.close().map(Effect::Item).into_iter().collect()
    }
}

#[derive(Debug, Default)]
struct TemplateBuilder {
    title: Option<String>,
    subtitle: Option<String>,
    sort_properties: Vec<String>,
    identifier_properties: Vec<String>,
    items: Vec<DisplayItem>,
    visibility: SectionVisibility,
}

impl TemplateBuilder {
    fn apply(&mut self, effect: Effect, line: u64) -> Result<()> {
        match effect {
            Effect::Item(item) => self.items.push(item),
            Effect::Command(Command::Title(title)) => self.title = Some(title),
            Effect::Command(Command::Subtitle(subtitle)) => self.subtitle = Some(subtitle),
            Effect::Command(Command::Sort(property)) => {
                if self.sort_properties.contains(&property) {
                    return Err(TemplateError::DuplicateSortKey { line, property });
                }
                self.sort_properties.push(property);
            }
            Effect::Command(Command::Identifier(property)) => {
                self.identifier_properties.push(property);
            }
            Effect::Command(Command::Other(item)) => self.items.push(DisplayItem::Other(item)),
            Effect::Command(Command::Hide(item)) => self.items.push(DisplayItem::Hidden(item)),
            Effect::Command(Command::Show(visibility)) => self.visibility = visibility,
        }
        Ok(())
    }

    fn finish(mut self) -> Result<DisplaySpec> {
        if self.identifier_properties.is_empty() {
            let fallback = default_identifier(&self.items).ok_or(TemplateError::NoIdentifier)?;
            debug!(property = fallback, "defaulting identifier property");
            self.identifier_properties.push(fallback.to_string());
        }
        Ok(DisplaySpec {
            title: self.title,
            subtitle: self.subtitle,
            sort_properties: self.sort_properties,
            identifier_properties: self.identifier_properties,
            items: self.items,
            visibility: self.visibility,
        })
    }
}

/// First scalar (group members included) or hidden property in template order.
fn default_identifier(items: &[DisplayItem]) -> Option<&str> {
    items.iter().find_map(|item| match item {
        DisplayItem::Scalar(scalar) => Some(scalar.property.as_str()),
        DisplayItem::Group(group) => group.members.first().map(|m| m.property.as_str()),
        DisplayItem::Hidden(hidden) => Some(hidden.property.as_str()),
        DisplayItem::Other(_) => None,
    })
}

/// Parses template rows into a display specification.
///
/// The first row is a header and is always skipped.
pub fn parse_template(rows: &[SourceRow]) -> Result<DisplaySpec> {
    let mut state = ParseState::Idle;
    let mut builder = TemplateBuilder::default();
    let mut last_line = 1;
    for row in rows.iter().skip(1) {
        last_line = row.line;
        let classified = classify_row(row)?;
        trace!(line = row.line, row = ?classified, "template row");
        if classified == TemplateRow::Ignored {
            warn!(
                line = row.line,
                "ignoring template row without label or property"
            );
        }
        let (next, effects) = state.advance(classified);
        state = next;
        for effect in effects {
            builder.apply(effect, row.line)?;
        }
    }
    if let Some(group) = state.close() {
        builder.apply(Effect::Item(group), last_line)?;
    }
    let spec = builder.finish()?;
    debug!(
        items = spec.items.len(),
        sort_keys = spec.sort_properties.len(),
        identifiers = spec.identifier_properties.len(),
        "parsed template"
    );
    Ok(spec)
}

/// Parses template text.
///
/// Empty lines are blank rows and close an open group.
pub fn parse_template_str(text: &str) -> Result<DisplaySpec> {
    let rows = read_rows_with(text.as_bytes(), BlankLines::Keep)?;
    parse_template(&rows)
}

/// Reads and parses a template file.
pub fn read_template(path: &Path) -> Result<DisplaySpec> {
    let rows = read_rows_from_path_with(path, BlankLines::Keep)?;
    parse_template(&rows)
}
