//! Report entry points.

use std::collections::BTreeSet;
use std::io::Write;

use csvdoc_model::{DisplaySpec, ReportWarning, Table};
use csvdoc_template::unused_properties;
use tracing::{debug, info, info_span};

use crate::context::ReportContext;
use crate::error::{Result, write_error};
use crate::html::{
    HtmlWriter, close, html_writer, open, write_doctype, write_raw_element, write_text_element,
    write_void,
};
use crate::options::RenderOptions;
use crate::properties::write_properties_section;
use crate::records::write_records_section;

/// Footer timestamp format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }
header .subtitle { color: #555; }
article { border-top: 1px solid #ccc; padding: 0.5em 0; }
.context { color: #777; margin: 0; }
dl.group { margin: 0; }
dt { font-weight: bold; }
nav.index li.other, article.other .category { color: #665; }
nav.index li.hidden, article.hidden .category { color: #888; }
nav.index li.unexpected, article.unexpected .category { color: #a33; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ddd; padding: 0.2em 0.5em; text-align: left; }
footer { color: #777; font-size: small; margin-top: 2em; }
";

/// A rendered report and the warnings found while rendering it.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub html: String,
    pub warnings: Vec<ReportWarning>,
}

/// Warnings in discovery order, each reported once.
#[derive(Debug, Default)]
struct WarningSet {
    seen: BTreeSet<ReportWarning>,
    ordered: Vec<ReportWarning>,
}

impl WarningSet {
    fn push(&mut self, warning: ReportWarning) {
        if self.seen.insert(warning.clone()) {
            self.ordered.push(warning);
        }
    }

    fn into_vec(self) -> Vec<ReportWarning> {
        self.ordered
    }
}

impl Extend<ReportWarning> for WarningSet {
    fn extend<I: IntoIterator<Item = ReportWarning>>(&mut self, iter: I) {
        for warning in iter {
            self.push(warning);
        }
    }
}

/// Render a report into memory.
///
/// Nothing is produced when validation fails.
pub fn render(table: &Table, spec: &DisplaySpec, options: &RenderOptions) -> Result<RenderedReport> {
    let mut buffer = Vec::new();
    let warnings = render_to(&mut buffer, table, spec, options)?;
    let html = String::from_utf8(buffer).map_err(write_error)?;
    Ok(RenderedReport { html, warnings })
}

/// Render a report to `writer`.
///
/// Template references are checked against the table before the first byte
/// is written.
///
/// Returns the warnings: unreferenced properties in data order, then missing
/// enumeration entries in the order they were met.
pub fn render_to<W: Write>(
    writer: W,
    table: &Table,
    spec: &DisplaySpec,
    options: &RenderOptions,
) -> Result<Vec<ReportWarning>> {
    let span = info_span!("render", records = table.len(), items = spec.items.len());
    let _guard = span.enter();

    let ctx = ReportContext::new(table, spec, options)?;

    let mut warnings = WarningSet::default();
    warnings.extend(
        unused_properties(table, spec)
            .into_iter()
            .map(|property| ReportWarning::UnreferencedProperty {
                property: property.to_string(),
            }),
    );

    let mut xml = html_writer(writer);
    write_document_start(&mut xml, &ctx)?;
    if spec.visibility.records {
        warnings.extend(write_records_section(&mut xml, &ctx)?);
    } else {
        debug!("records section hidden");
    }
    if spec.visibility.properties {
        warnings.extend(write_properties_section(&mut xml, &ctx)?);
    } else {
        debug!("properties section hidden");
    }
    write_document_end(&mut xml, &ctx)?;
    xml.get_mut().flush().map_err(write_error)?;

    let warnings = warnings.into_vec();
    info!(warnings = warnings.len(), "rendered report");
    Ok(warnings)
}

fn write_document_start<W: Write>(xml: &mut HtmlWriter<W>, ctx: &ReportContext<'_>) -> Result<()> {
    let title = ctx.title();
    write_doctype(xml)?;
    open(xml, "html", &[("lang", "en")])?;

    open(xml, "head", &[])?;
    write_void(xml, "meta", &[("charset", "utf-8")])?;
    write_text_element(xml, "title", &[], title)?;
    write_raw_element(xml, "style", STYLE)?;
    close(xml, "head")?;

    open(xml, "body", &[])?;
    open(xml, "header", &[])?;
    write_text_element(xml, "h1", &[], title)?;
    if let Some(subtitle) = ctx.spec.subtitle.as_deref() {
        write_text_element(xml, "p", &[("class", "subtitle")], subtitle)?;
    }
    close(xml, "header")?;
    open(xml, "main", &[])
}

fn write_document_end<W: Write>(xml: &mut HtmlWriter<W>, ctx: &ReportContext<'_>) -> Result<()> {
    close(xml, "main")?;
    if let Some(timestamp) = ctx.options.timestamp {
        let generated = format!("Generated {}", timestamp.format(TIMESTAMP_FORMAT));
        open(xml, "footer", &[])?;
        write_text_element(xml, "p", &[], &generated)?;
        close(xml, "footer")?;
    }
    close(xml, "body")?;
    close(xml, "html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(property: &str, value: &str) -> ReportWarning {
        ReportWarning::MissingEnumerationEntry {
            property: property.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn warning_set_keeps_first_occurrence_order() {
        let mut set = WarningSet::default();
        set.extend([
            warning("b", "2"),
            warning("a", "1"),
            warning("b", "2"),
            warning("b", "3"),
        ]);
        assert_eq!(
            set.into_vec(),
            vec![warning("b", "2"), warning("a", "1"), warning("b", "3")]
        );
    }
}
