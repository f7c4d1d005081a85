//! CSV tokenization into trimmed rows.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use csv::{Error as CsvError, Position, Reader, ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One tokenized input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line the row starts on.
    pub line: u64,
    /// Fields with surrounding whitespace removed.
    pub fields: Vec<String>,
}

impl SourceRow {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at `index`, or the empty string past the end of the row.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// True if no field has content.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// How the reader treats lines with no content at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// Drop empty lines.
    #[default]
    Skip,
    /// Report each empty line after the first row as a row with no fields.
    Keep,
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn parse_error(idx: usize) -> impl Fn(CsvError) -> IngestError {
    move |e| IngestError::CsvParse {
        line: e
            .position()
            .map(|pos| pos.line())
            .unwrap_or(idx as u64 + 1),
        message: e.to_string(),
    }
}

/// Reads every row from a CSV source without interpreting a header.
///
/// Rows may have differing field counts. Empty lines are skipped by the
/// reader; `line` is the reader's position for the row.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<SourceRow>> {
    let mut reader = csv_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(parse_error(idx))?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(idx as u64 + 1);
        let fields = record.iter().map(normalize_cell).collect();
        rows.push(SourceRow::new(line, fields));
    }
    debug!(rows = rows.len(), "tokenized csv input");
    Ok(rows)
}

/// Reads every row, treating empty lines as `blank_lines` says.
pub fn read_rows_with<R: Read>(mut reader: R, blank_lines: BlankLines) -> Result<Vec<SourceRow>> {
    match blank_lines {
        BlankLines::Skip => read_rows(reader),
        BlankLines::Keep => {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .map_err(|e| IngestError::CsvParse {
                    line: 1,
                    message: e.to_string(),
                })?;
            read_rows_keeping_blank_lines(&bytes)
        }
    }
}

/// Line numbers are counted from the raw bytes, since the reader's own
/// position for a record is where the previous read stopped.
fn read_rows_keeping_blank_lines(bytes: &[u8]) -> Result<Vec<SourceRow>> {
    let mut reader = csv_reader(bytes);
    let mut record = StringRecord::new();
    let mut rows = Vec::new();
    let mut counted = 0usize;
    let mut line = 1u64;
    let mut previous_end: Option<usize> = None;
    for idx in 0.. {
        let start = byte_offset(reader.position(), bytes);
        if !reader.read_record(&mut record).map_err(parse_error(idx))? {
            break;
        }
        let end = byte_offset(reader.position(), bytes).max(start);
        let content_start = start + leading_break_len(&bytes[start..end]);
        line += line_breaks(bytes, counted, content_start);
        counted = content_start;
        if let Some(previous_end) = previous_end {
            // One break terminates the previous record.
            let skipped = line_breaks(bytes, previous_end, content_start).saturating_sub(1);
            for offset in (1..=skipped).rev() {
                rows.push(SourceRow::new(line - offset, Vec::new()));
            }
        }
        previous_end = Some(end - trailing_break_len(&bytes[content_start..end]));
        let fields = record.iter().map(normalize_cell).collect();
        rows.push(SourceRow::new(line, fields));
    }
    debug!(rows = rows.len(), "tokenized csv input with blank lines");
    Ok(rows)
}

fn byte_offset(position: &Position, bytes: &[u8]) -> usize {
    usize::try_from(position.byte())
        .unwrap_or(bytes.len())
        .min(bytes.len())
}

fn is_break(byte: &u8) -> bool {
    matches!(*byte, b'\n' | b'\r')
}

fn leading_break_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| is_break(b)).count()
}

fn trailing_break_len(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|b| is_break(b)).count()
}

/// Line breaks in `bytes[from..to]`; `\r\n` counts once.
fn line_breaks(bytes: &[u8], from: usize, to: usize) -> u64 {
    (from..to)
        .filter(|&i| match bytes[i] {
            b'\n' => true,
            b'\r' => bytes.get(i + 1) != Some(&b'\n'),
            _ => false,
        })
        .count() as u64
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Reads every row from a CSV file.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<SourceRow>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    read_rows(file)
}

/// Reads every row from a CSV file, treating empty lines as `blank_lines` says.
pub fn read_rows_from_path_with(path: &Path, blank_lines: BlankLines) -> Result<Vec<SourceRow>> {
    match blank_lines {
        BlankLines::Skip => read_rows_from_path(path),
        BlankLines::Keep => {
            let bytes = fs::read(path).map_err(|e| open_error(path, e))?;
            read_rows_keeping_blank_lines(&bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_trims_fields() {
        let rows = read_rows("  a  , b ,c\n1, 2 ,3\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["a", "b", "c"]);
        assert_eq!(rows[1].fields, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_read_rows_quoted() {
        let rows = read_rows("\"hello, world\",\"he said \"\"hi\"\"\"\n".as_bytes()).unwrap();
        assert_eq!(rows[0].fields, vec!["hello, world", "he said \"hi\""]);
    }

    #[test]
    fn test_read_rows_flexible_widths() {
        let rows = read_rows("a,b,c\n1\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(rows[1].fields.len(), 1);
        assert_eq!(rows[2].fields.len(), 4);
    }

    #[test]
    fn test_read_rows_with_bom() {
        let rows = read_rows("\u{feff}A,B\n1,2\n".as_bytes()).unwrap();
        assert_eq!(rows[0].fields, vec!["A", "B"]);
    }

    #[test]
    fn test_read_rows_line_numbers() {
        let rows = read_rows("a,b\n1,2\n3,4\n".as_bytes()).unwrap();
        let lines: Vec<u64> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_rows_skips_empty_lines() {
        let rows = read_rows("a,b\n\n1,2\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["1", "2"]);
    }

    #[test]
    fn test_keep_blank_lines_reports_empty_lines() {
        let rows = read_rows_with("a,b\n1,2\n\n3,4\n".as_bytes(), BlankLines::Keep).unwrap();
        let lines: Vec<u64> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert!(rows[2].is_blank());
        assert_eq!(rows[3].fields, vec!["3", "4"]);
    }

    #[test]
    fn test_keep_blank_lines_with_crlf_and_runs() {
        let rows = read_rows_with("a\r\n\r\n\r\nb\r\n".as_bytes(), BlankLines::Keep).unwrap();
        let lines: Vec<u64> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert!(rows[1].is_blank() && rows[2].is_blank());
        assert_eq!(rows[3].fields, vec!["b"]);
    }

    #[test]
    fn test_keep_blank_lines_ignores_breaks_inside_quotes() {
        let text = "a\n\"one\n\ntwo\"\nb\n\n";
        let rows = read_rows_with(text.as_bytes(), BlankLines::Keep).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].fields, vec!["one\n\ntwo"]);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].line, 5);
    }

    #[test]
    fn test_keep_blank_lines_drops_leading_empty_lines() {
        let rows = read_rows_with("\n\na,b\n".as_bytes(), BlankLines::Keep).unwrap();
        assert_eq!(rows, vec![SourceRow::new(3, vec!["a".to_string(), "b".to_string()])]);
    }

    #[test]
    fn test_source_row_field_past_end() {
        let row = SourceRow::new(1, vec!["a".to_string(), String::new()]);
        assert_eq!(row.field(0), "a");
        assert_eq!(row.field(5), "");
        assert!(!row.is_blank());
        assert!(SourceRow::new(2, vec![String::new(), String::new()]).is_blank());
    }

    #[test]
    fn test_read_rows_from_missing_path() {
        let result = read_rows_from_path(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
        let result = read_rows_from_path_with(Path::new("/definitely/not/here.csv"), BlankLines::Keep);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
