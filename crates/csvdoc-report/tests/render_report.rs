//! End-to-end rendering from CSV text.

use chrono::NaiveDate;
use csvdoc_ingest::{load_table, read_rows};
use csvdoc_model::{ReportWarning, Table};
use csvdoc_report::{RenderError, RenderOptions, render, render_to};
use csvdoc_template::{default_template, parse_template_str};

fn table(text: &str) -> Table {
    load_table(&read_rows(text.as_bytes()).unwrap()).unwrap()
}

fn options() -> RenderOptions {
    RenderOptions::new("people")
}

/// Text between the opening tag of `id`'s section and its closing tag.
fn section<'a>(html: &'a str, id: &str) -> &'a str {
    let start = html
        .find(&format!("<section id=\"{id}\">"))
        .unwrap_or_else(|| panic!("no {id} section in:\n{html}"));
    let rest = &html[start..];
    let end = rest.find("</section>").unwrap();
    &rest[..end]
}

#[test]
fn enumeration_maps_known_values_and_warns_on_unknown() {
    let table = table("name,status\nAnn,1\nBob,2\nCy,2\n");
    let spec = parse_template_str("h\nName,name\nStatus,status,0=off;1=on,\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();

    let records = section(&report.html, "records");
    assert!(records.contains("<dd>on</dd>"));
    assert!(records.contains("<dd>2</dd>"));
    assert!(!records.contains("<dd>1</dd>"));
    assert_eq!(
        report.warnings,
        vec![ReportWarning::MissingEnumerationEntry {
            property: "status".to_string(),
            value: "2".to_string(),
        }]
    );
}

#[test]
fn missing_property_fails_without_output() {
    let table = table("name\nAnn\n");
    let spec = parse_template_str("h\nName,name\nGhost,ghost\n").unwrap();
    let mut buffer = Vec::new();
    let err = render_to(&mut buffer, &table, &spec, &options()).unwrap_err();
    assert!(matches!(err, RenderError::PropertyNotInData { ref property } if property == "ghost"));
    assert!(buffer.is_empty());
    assert_eq!(
        err.to_string(),
        "template references property 'ghost' which is not in the data"
    );
}

#[test]
fn records_follow_sort_keys_with_empty_values_last() {
    let table = table("name,dept\nZoe,B\nAmy,\nBen,A\n");
    let spec = parse_template_str("h\n_SORT,dept\nName,name\nDept,dept\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let html = &report.html;
    let ben = html.find("<h3>Ben</h3>").unwrap();
    let zoe = html.find("<h3>Zoe</h3>").unwrap();
    let amy = html.find("<h3>Amy</h3>").unwrap();
    assert!(ben < zoe && zoe < amy);
}

#[test]
fn heading_uses_identifier_values() {
    let table = table("last,first,note\nSmith,Ann,x\n,,y\n");
    let spec =
        parse_template_str("h\n_IDENTIFIER,first\n_IDENTIFIER,last\nNote,note\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let records = section(&report.html, "records");
    assert!(records.contains("<p class=\"context\">Ann</p>"));
    assert!(records.contains("<h3>Smith</h3>"));
    assert!(records.contains("<h3>(Untitled)</h3>"));
    assert!(records.contains("<a href=\"#r1\">Ann / Smith</a>"));
    assert!(records.contains("<a href=\"#r2\">(Untitled)</a>"));
}

#[test]
fn empty_values_and_groups_are_skipped() {
    let table = table("name,street,city,age\nAnn,Main St,,\nBob,,,40\n");
    let spec =
        parse_template_str("h\nName,name\nAddress,,,\nStreet,street\nCity,city\n,,,\nAge,age\n")
            .unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let records = section(&report.html, "records");

    let bob = records.find("id=\"r2\"").unwrap();
    let (ann_part, bob_part) = records.split_at(bob);
    assert!(ann_part.contains("<dt class=\"group\">Address</dt>"));
    assert!(ann_part.contains("<dd>Main St</dd>"));
    assert!(!ann_part.contains("<dt>City</dt>"));
    assert!(!ann_part.contains("<dt>Age</dt>"));
    assert!(!bob_part.contains("Address"));
    assert!(bob_part.contains("<dd>40</dd>"));
}

#[test]
fn other_and_hidden_stay_out_of_records() {
    let table = table("name,comment,secret\nAnn,hello,s3cret\n");
    let spec = parse_template_str("h\nName,name\n_OTHER,comment\n_HIDE,secret\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let records = section(&report.html, "records");
    assert!(!records.contains("hello"));
    assert!(!records.contains("s3cret"));

    let properties = section(&report.html, "properties");
    assert!(properties.contains("<td>hello</td>"));
    assert!(!properties.contains("s3cret"));
}

#[test]
fn include_hidden_and_exclude_other_change_summaries() {
    let table = table("name,comment,secret\nAnn,hello,s3cret\n");
    let spec = parse_template_str("h\nName,name\n_OTHER,comment\n_HIDE,secret\n").unwrap();
    let options = options().with_exclude_other(true).with_include_hidden(true);
    let report = render(&table, &spec, &options).unwrap();
    let properties = section(&report.html, "properties");
    assert!(!properties.contains("hello"));
    assert!(properties.contains("<td>s3cret</td>"));
    assert!(properties.contains("class=\"property hidden\""));
}

#[test]
fn unexpected_property_gets_summary_and_warning() {
    let table = table("name,extra\nAnn,surprise\n");
    let spec = parse_template_str("h\nName,name\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let properties = section(&report.html, "properties");
    assert!(properties.contains("<article class=\"property unexpected\" id=\"p1\">"));
    assert!(properties.contains("<td>surprise</td>"));
    insta::assert_json_snapshot!(report.warnings, @r#"
    [
      {
        "kind": "unreferenced_property",
        "property": "extra"
      }
    ]
    "#);
}

#[test]
fn warnings_list_unreferenced_before_enumeration_misses() {
    let table = table("status,extra\n9,x\n8,y\n9,z\n");
    let spec = parse_template_str("h\nStatus,status,0=off\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let kinds: Vec<String> = report.warnings.iter().map(ToString::to_string).collect();
    assert_eq!(
        kinds,
        vec![
            "property 'extra' is not referenced by the template",
            "no enumeration entry for value '9' of property 'status'",
            "no enumeration entry for value '8' of property 'status'",
        ]
    );
}

#[test]
fn properties_index_is_alphabetical() {
    let table = table("zeta,alpha,mid\n1,2,3\n");
    let spec = parse_template_str("h\nZeta,zeta\nAlpha,alpha\n_OTHER,mid\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let properties = section(&report.html, "properties");
    let index_end = properties.find("</nav>").unwrap();
    let index = &properties[..index_end];
    let alpha = index.find("<a href=\"#p1\">alpha</a>").unwrap();
    let mid = index.find("<a href=\"#p2\">mid</a>").unwrap();
    let zeta = index.find("<a href=\"#p0\">zeta</a>").unwrap();
    assert!(alpha < mid && mid < zeta);
    assert!(index.contains("<li class=\"other\">"));
}

#[test]
fn summaries_show_notes_and_legend() {
    let table = table("status\n0\n");
    let spec = parse_template_str("h\nStatus,status,0=off;1=on,Whether active\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    let properties = section(&report.html, "properties");
    assert!(properties.contains("<p class=\"notes\">Whether active</p>"));
    assert!(properties.contains("<dl class=\"enumeration\">"));
    assert!(properties.contains("<dt>1</dt>"));
    assert!(properties.contains("<td>off</td>"));
}

#[test]
fn show_command_limits_sections() {
    let table = table("name\nAnn\n");
    let spec = parse_template_str("h\n_SHOW,properties\nName,name\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    assert!(!report.html.contains("<section id=\"records\">"));
    let properties = section(&report.html, "properties");
    assert!(!properties.contains("<nav class=\"index\">"));
    // Record links need a records section to point at.
    assert!(properties.contains("<td>Ann</td>"));

    let spec = parse_template_str("h\n_SHOW,records\nName,name\n").unwrap();
    let report = render(&table, &spec, &options()).unwrap();
    assert!(!report.html.contains("<section id=\"properties\">"));
    assert!(!report.html.contains("<nav class=\"contents\">"));
}

#[test]
fn title_subtitle_and_footer() {
    let table = table("name\nAnn\n");
    let untitled = render(&table, &default_template(&table), &options()).unwrap();
    assert!(untitled.html.starts_with("<!DOCTYPE html>"));
    assert!(untitled.html.contains("<title>people</title>"));
    assert!(untitled.html.contains("<h1>people</h1>"));
    assert!(!untitled.html.contains("<footer>"));

    let spec = parse_template_str("h\n_TITLE,Staff & friends\n_SUBTITLE,2024\nName,name\n")
        .unwrap();
    let timestamp = NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|date| date.and_hms_opt(14, 7, 0));
    let report = render(&table, &spec, &options().with_timestamp(timestamp)).unwrap();
    assert!(report.html.contains("<h1>Staff &amp; friends</h1>"));
    assert!(report.html.contains("<p class=\"subtitle\">2024</p>"));
    assert!(report.html.contains("<p>Generated 2024-03-05 14:07</p>"));
}

#[test]
fn values_are_escaped() {
    let table = table("name\n<b>Ann</b>\n");
    let report = render(&table, &default_template(&table), &options()).unwrap();
    assert!(report.html.contains("<h3>&lt;b&gt;Ann&lt;/b&gt;</h3>"));
    assert!(!report.html.contains("<b>Ann</b>"));
}
