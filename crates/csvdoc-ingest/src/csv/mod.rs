//! CSV reading utilities.

mod header;
mod reader;

pub use header::{HEADER_LINE, parse_header};
pub use reader::{
    BlankLines, SourceRow, read_rows, read_rows_from_path, read_rows_from_path_with, read_rows_with,
};
