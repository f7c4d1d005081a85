//! Keywords and labels shared by the template parser and the renderer.

/// A template row whose first field starts with this marker is a comment.
pub const COMMENT_MARKER: char = '#';

/// A template row whose first field starts with this marker is a command.
pub const COMMAND_MARKER: char = '_';

/// Maximum number of fields in a template row (label, property, enumeration, notes).
pub const MAX_TEMPLATE_FIELDS: usize = 4;

pub const CMD_TITLE: &str = "TITLE";
pub const CMD_SUBTITLE: &str = "SUBTITLE";
pub const CMD_SORT: &str = "SORT";
pub const CMD_IDENTIFIER: &str = "IDENTIFIER";
pub const CMD_OTHER: &str = "OTHER";
pub const CMD_HIDE: &str = "HIDE";
pub const CMD_SHOW: &str = "SHOW";

pub const SECTION_RECORDS: &str = "records";
pub const SECTION_CONTENTS: &str = "contents";
pub const SECTION_PROPERTIES: &str = "properties";
pub const SECTION_INDEX: &str = "index";
pub const SECTION_ALL: &str = "all";

/// Separator between entries of a `_SHOW` list and of an enumeration.
pub const LIST_SEPARATOR: char = ';';

/// Separator between the raw value and the label of an enumeration entry.
pub const ENUMERATION_ASSIGN: char = '=';

pub const CATEGORY_NORMAL: &str = "normal";
pub const CATEGORY_OTHER: &str = "other";
pub const CATEGORY_HIDDEN: &str = "hidden";
pub const CATEGORY_UNEXPECTED: &str = "unexpected";

/// Heading used for a record without any identifier value.
pub const UNTITLED: &str = "(Untitled)";
