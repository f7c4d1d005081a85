//! Data ingestion for csvdoc.
//!
//! Tokenizes CSV input into [`SourceRow`]s and loads data files into a
//! [`csvdoc_model::Table`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvdoc_ingest::read_table;
//!
//! let table = read_table(Path::new("people.csv"))?;
//! for record in table.records() {
//!     println!("{}", record.value("name"));
//! }
//! ```

mod csv;
mod error;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    BlankLines, HEADER_LINE, SourceRow, parse_header, read_rows, read_rows_from_path,
    read_rows_from_path_with, read_rows_with,
};

// === Table Loading ===
pub use table::{load_table, read_table};
