use std::io::Write;

use csvdoc_ingest::{IngestError, read_table};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_table_from_file() {
    let file = create_temp_csv("name,status,city\nAda,1,London\nGrace,0,\n,,\n");
    let table = read_table(file.path()).expect("read table");

    assert_eq!(table.properties().to_vec(), vec!["name", "status", "city"]);
    assert_eq!(table.len(), 2);

    let grace = &table.records()[1];
    assert_eq!(grace.value("name"), "Grace");
    assert_eq!(grace.value("city"), "");
    assert_eq!(grace.line(), 3);
}

#[test]
fn record_count_matches_non_blank_rows() {
    let file = create_temp_csv("a,b\n1,\n,\n,2\n , \n3,3\n");
    let table = read_table(file.path()).expect("read table");
    assert_eq!(table.len(), 3);
}

#[test]
fn reports_row_field_count_with_line() {
    let file = create_temp_csv("a,b\n1,2\n3,4,5\n");
    let err = read_table(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::RowFieldCount { line: 3, .. }));
    assert_eq!(err.line(), Some(3));
}

#[test]
fn reports_duplicate_header() {
    let file = create_temp_csv("a,b,b\n1,2,3\n");
    let err = read_table(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::Header { line: 1, .. }));
}
