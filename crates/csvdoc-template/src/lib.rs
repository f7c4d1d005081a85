//! Template language for csvdoc.
//!
//! A template is a CSV file whose first row is ignored. Each following row is
//! one of:
//!
//! - a comment (`#` in the first field)
//! - a command (`_TITLE`, `_SUBTITLE`, `_SORT`, `_IDENTIFIER`, `_OTHER`,
//!   `_HIDE`, `_SHOW` in the first field, parameter in the second)
//! - a group label (label, no property), closed by a blank row
//! - an item: `label, property, enumeration, notes`
//!
//! # Example
//!
//! ```ignore
//! use csvdoc_template::parse_template_str;
//!
//! let spec = parse_template_str("label,property\n_TITLE,People\nName,name\n")?;
//! assert_eq!(spec.identifier_properties, vec!["name".to_string()]);
//! ```

mod defaults;
mod enumeration;
mod error;
mod export;
mod parser;

pub use defaults::{default_template, unused_properties};
pub use enumeration::{format_enumeration, parse_enumeration};
pub use error::{EnumerationError, Result, TemplateError};
pub use export::{TEMPLATE_HEADER, write_template};
pub use parser::{
    Command, Effect, ParseState, TemplateRow, classify_row, parse_template, parse_template_str,
    read_template,
};
