//! Error types for data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and loading tabular input.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the input.
    #[error("failed to parse CSV at line {line}: {message}")]
    CsvParse { line: u64, message: String },

    // === Table Errors ===
    /// Header row is missing, has a blank name, or repeats a name.
    #[error("invalid header at line {line}: {message}")]
    Header { line: u64, message: String },

    /// A data row has non-blank fields beyond the header width.
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RowFieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl IngestError {
    /// Source line the error refers to, when known.
    pub fn line(&self) -> Option<u64> {
        match self {
            IngestError::CsvParse { line, .. }
            | IngestError::Header { line, .. }
            | IngestError::RowFieldCount { line, .. } => Some(*line),
            IngestError::FileNotFound { .. } | IngestError::FileRead { .. } => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_row_field_count_display() {
        let err = IngestError::RowFieldCount {
            line: 4,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "line 4: expected at most 2 fields, found 3");
        assert_eq!(err.line(), Some(4));
    }
}
