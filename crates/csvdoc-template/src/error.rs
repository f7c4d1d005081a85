//! Error types for template parsing.

use csvdoc_ingest::IngestError;
use thiserror::Error;

/// Errors raised while turning template rows into a display specification.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("line {line}: template rows have at most {max} fields, found {found}")]
    TooManyFields { line: u64, found: usize, max: usize },

    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: u64, command: String },

    #[error("line {line}: unknown section '{value}' in show list")]
    UnknownShowValue { line: u64, value: String },

    #[error("line {line}: property '{property}' is already a sort key")]
    DuplicateSortKey { line: u64, property: String },

    #[error("line {line}: command '{command}' requires a parameter")]
    MissingParameter { line: u64, command: String },

    #[error("template defines no identifier and has no scalar or hidden item to default to")]
    NoIdentifier,

    #[error("line {line}: enumeration entry '{entry}' is not of the form key=value")]
    MalformedEnumeration { line: u64, entry: String },

    #[error("line {line}: enumeration key '{key}' appears more than once")]
    DuplicateEnumerationKey { line: u64, key: String },

    #[error("failed to read template: {0}")]
    Ingest(#[from] IngestError),

    #[error("failed to write template: {message}")]
    Write { message: String },
}

impl TemplateError {
    /// Template line the error refers to, when known.
    pub fn line(&self) -> Option<u64> {
        match self {
            TemplateError::TooManyFields { line, .. }
            | TemplateError::UnknownCommand { line, .. }
            | TemplateError::UnknownShowValue { line, .. }
            | TemplateError::DuplicateSortKey { line, .. }
            | TemplateError::MissingParameter { line, .. }
            | TemplateError::MalformedEnumeration { line, .. }
            | TemplateError::DuplicateEnumerationKey { line, .. } => Some(*line),
            TemplateError::Ingest(err) => err.line(),
            TemplateError::NoIdentifier | TemplateError::Write { .. } => None,
        }
    }
}

/// Errors from parsing an enumeration string on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("enumeration entry '{entry}' is not of the form key=value")]
    Malformed { entry: String },

    #[error("enumeration key '{key}' appears more than once")]
    DuplicateKey { key: String },
}

impl EnumerationError {
    /// Attaches the template line the enumeration was read from.
    pub fn at_line(self, line: u64) -> TemplateError {
        match self {
            EnumerationError::Malformed { entry } => {
                TemplateError::MalformedEnumeration { line, entry }
            }
            EnumerationError::DuplicateKey { key } => {
                TemplateError::DuplicateEnumerationKey { line, key }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
