//! Records section: contents list and one article per record.

use std::io::Write;

use csvdoc_model::{DisplayItem, GroupItem, Record, ReportWarning, ScalarItem};
use tracing::trace;

use crate::context::{ReportContext, display_value};
use crate::error::Result;
use crate::html::{HtmlWriter, close, open, write_link, write_text_element};

pub(crate) const RECORDS_SECTION_ID: &str = "records";

pub(crate) fn write_records_section<W: Write>(
    xml: &mut HtmlWriter<W>,
    ctx: &ReportContext<'_>,
) -> Result<Vec<ReportWarning>> {
    let mut warnings = Vec::new();
    open(xml, "section", &[("id", RECORDS_SECTION_ID)])?;
    write_text_element(xml, "h2", &[], "Records")?;

    if ctx.spec.visibility.contents {
        write_contents(xml, ctx)?;
    }
    for record in &ctx.records {
        warnings.extend(write_record(xml, ctx, record)?);
    }

    close(xml, "section")?;
    Ok(warnings)
}

fn write_contents<W: Write>(xml: &mut HtmlWriter<W>, ctx: &ReportContext<'_>) -> Result<()> {
    open(xml, "nav", &[("class", "contents")])?;
    open(xml, "ol", &[])?;
    for record in &ctx.records {
        open(xml, "li", &[])?;
        write_link(xml, &record.id().anchor(), &ctx.record_label(record))?;
        close(xml, "li")?;
    }
    close(xml, "ol")?;
    close(xml, "nav")
}

fn write_record<W: Write>(
    xml: &mut HtmlWriter<W>,
    ctx: &ReportContext<'_>,
    record: &Record,
) -> Result<Vec<ReportWarning>> {
    let anchor = record.id().anchor();
    trace!(record = %anchor, line = record.line(), "writing record");
    let mut warnings = Vec::new();

    open(xml, "article", &[("class", "record"), ("id", anchor.as_str())])?;
    let (context, heading) = ctx.record_heading(record);
    if let Some(context) = context {
        write_text_element(xml, "p", &[("class", "context")], &context)?;
    }
    write_text_element(xml, "h3", &[], heading)?;

    open(xml, "dl", &[])?;
    for item in &ctx.spec.items {
        match item {
            DisplayItem::Scalar(scalar) => {
                warnings.extend(write_scalar(xml, record, scalar)?);
            }
            DisplayItem::Group(group) => {
                warnings.extend(write_group(xml, record, group)?);
            }
            DisplayItem::Other(_) | DisplayItem::Hidden(_) => {}
        }
    }
    close(xml, "dl")?;

    close(xml, "article")?;
    Ok(warnings)
}

/// Writes a `dt`/`dd` pair for a non-empty value.
fn write_scalar<W: Write>(
    xml: &mut HtmlWriter<W>,
    record: &Record,
    scalar: &ScalarItem,
) -> Result<Option<ReportWarning>> {
    let raw = record.value(&scalar.property);
    if raw.is_empty() {
        return Ok(None);
    }
    let (shown, warning) = display_value(&scalar.property, raw, scalar.enumeration.as_ref());
    write_text_element(xml, "dt", &[], &scalar.label)?;
    write_text_element(xml, "dd", &[], shown)?;
    Ok(warning)
}

fn write_group<W: Write>(
    xml: &mut HtmlWriter<W>,
    record: &Record,
    group: &GroupItem,
) -> Result<Vec<ReportWarning>> {
    let mut warnings = Vec::new();
    if !group
        .members
        .iter()
        .any(|member| record.has_value(&member.property))
    {
        return Ok(warnings);
    }

    write_text_element(xml, "dt", &[("class", "group")], &group.label)?;
    open(xml, "dd", &[])?;
    open(xml, "dl", &[("class", "group")])?;
    for member in &group.members {
        warnings.extend(write_scalar(xml, record, member)?);
    }
    close(xml, "dl")?;
    close(xml, "dd")?;
    Ok(warnings)
}
