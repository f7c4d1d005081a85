//! Properties section: index plus one summary per shown property.

use std::collections::BTreeSet;
use std::io::Write;

use csvdoc_model::{DisplayItem, Enumeration, PropertyCategory, ReportWarning};
use csvdoc_template::unused_properties;
use tracing::debug;

use crate::context::{ReportContext, display_value};
use crate::error::Result;
use crate::html::{HtmlWriter, close, open, write_link, write_text_element};

pub(crate) const PROPERTIES_SECTION_ID: &str = "properties";

/// One summary block in the properties section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertySummary<'a> {
    pub property: &'a str,
    pub label: String,
    pub category: PropertyCategory,
    pub enumeration: Option<&'a Enumeration>,
    pub notes: &'a str,
}

impl<'a> PropertySummary<'a> {
    fn new(
        property: &'a str,
        label: String,
        category: PropertyCategory,
        enumeration: Option<&'a Enumeration>,
        notes: &'a str,
    ) -> Self {
        Self {
            property,
            label,
            category,
            enumeration,
            notes,
        }
    }
}

/// Summaries in template order, followed by unexpected properties in data order.
///
/// A property referenced by more than one item is summarized once, for the
/// first item that shows it.
pub(crate) fn collect_summaries<'a>(ctx: &ReportContext<'a>) -> Vec<PropertySummary<'a>> {
    let spec = ctx.spec;
    let mut summaries = Vec::new();
    for item in &spec.items {
        match item {
            DisplayItem::Scalar(scalar) => summaries.push(PropertySummary::new(
                &scalar.property,
                scalar.label.clone(),
                PropertyCategory::Normal,
                scalar.enumeration.as_ref(),
                &scalar.notes,
            )),
            DisplayItem::Group(group) => {
                for member in &group.members {
                    let label = if member.label.is_empty() {
                        group.label.clone()
                    } else {
                        format!("{}: {}", group.label, member.label)
                    };
                    summaries.push(PropertySummary::new(
                        &member.property,
                        label,
                        PropertyCategory::Normal,
                        member.enumeration.as_ref(),
                        &member.notes,
                    ));
                }
            }
            DisplayItem::Other(other) if !ctx.options.exclude_other => {
                summaries.push(PropertySummary::new(
                    &other.property,
                    other.property.clone(),
                    PropertyCategory::Other,
                    other.enumeration.as_ref(),
                    &other.notes,
                ));
            }
            DisplayItem::Hidden(hidden) if ctx.options.include_hidden => {
                summaries.push(PropertySummary::new(
                    &hidden.property,
                    hidden.property.clone(),
                    PropertyCategory::Hidden,
                    hidden.enumeration.as_ref(),
                    &hidden.notes,
                ));
            }
            DisplayItem::Other(_) | DisplayItem::Hidden(_) => {}
        }
    }

    let mut seen = BTreeSet::new();
    summaries.retain(|summary| seen.insert(summary.property));

    summaries.extend(
        unused_properties(ctx.table, spec)
            .into_iter()
            .map(|property| {
                PropertySummary::new(
                    property,
                    property.to_string(),
                    PropertyCategory::Unexpected,
                    None,
                    "",
                )
            }),
    );
    summaries
}

pub(crate) fn write_properties_section<W: Write>(
    xml: &mut HtmlWriter<W>,
    ctx: &ReportContext<'_>,
) -> Result<Vec<ReportWarning>> {
    let summaries = collect_summaries(ctx);
    debug!(summaries = summaries.len(), "writing properties section");

    let mut warnings = Vec::new();
    open(xml, "section", &[("id", PROPERTIES_SECTION_ID)])?;
    write_text_element(xml, "h2", &[], "Properties")?;

    if ctx.spec.visibility.index {
        write_index(xml, ctx, &summaries)?;
    }
    for summary in &summaries {
        warnings.extend(write_summary(xml, ctx, summary)?);
    }

    close(xml, "section")?;
    Ok(warnings)
}

/// Alphabetical index of summarized properties.
fn write_index<W: Write>(
    xml: &mut HtmlWriter<W>,
    ctx: &ReportContext<'_>,
    summaries: &[PropertySummary<'_>],
) -> Result<()> {
    let mut entries: Vec<&PropertySummary<'_>> = summaries.iter().collect();
    entries.sort_by(|a, b| a.property.cmp(b.property));

    open(xml, "nav", &[("class", "index")])?;
    open(xml, "ul", &[])?;
    for entry in entries {
        open(xml, "li", &[("class", entry.category.as_str())])?;
        if let Some(anchor) = ctx.property_anchor(entry.property) {
            write_link(xml, &anchor, entry.property)?;
        }
        close(xml, "li")?;
    }
    close(xml, "ul")?;
    close(xml, "nav")
}

fn write_summary<W: Write>(
    xml: &mut HtmlWriter<W>,
    ctx: &ReportContext<'_>,
    summary: &PropertySummary<'_>,
) -> Result<Vec<ReportWarning>> {
    let mut warnings = Vec::new();
    let class = format!("property {}", summary.category);
    let anchor = ctx.property_anchor(summary.property).unwrap_or_default();

    open(
        xml,
        "article",
        &[("class", class.as_str()), ("id", anchor.as_str())],
    )?;
    open(xml, "h3", &[])?;
    write_text_element(xml, "span", &[("class", "label")], &summary.label)?;
    write_text_element(xml, "code", &[], summary.property)?;
    close(xml, "h3")?;
    if summary.category != PropertyCategory::Normal {
        write_text_element(xml, "p", &[("class", "category")], summary.category.as_str())?;
    }
    if !summary.notes.is_empty() {
        write_text_element(xml, "p", &[("class", "notes")], summary.notes)?;
    }
    if let Some(enumeration) = summary.enumeration {
        write_legend(xml, enumeration)?;
    }

    open(xml, "table", &[])?;
    open(xml, "thead", &[])?;
    open(xml, "tr", &[])?;
    write_text_element(xml, "th", &[], "Record")?;
    write_text_element(xml, "th", &[], "Value")?;
    close(xml, "tr")?;
    close(xml, "thead")?;
    open(xml, "tbody", &[])?;
    for &record in &ctx.records {
        let (shown, warning) = display_value(
            summary.property,
            record.value(summary.property),
            summary.enumeration,
        );
        warnings.extend(warning);

        open(xml, "tr", &[])?;
        let label = ctx.record_label(record);
        if ctx.spec.visibility.records {
            open(xml, "td", &[])?;
            write_link(xml, &record.id().anchor(), &label)?;
            close(xml, "td")?;
        } else {
            write_text_element(xml, "td", &[], &label)?;
        }
        write_text_element(xml, "td", &[], shown)?;
        close(xml, "tr")?;
    }
    close(xml, "tbody")?;
    close(xml, "table")?;

    close(xml, "article")?;
    Ok(warnings)
}

fn write_legend<W: Write>(xml: &mut HtmlWriter<W>, enumeration: &Enumeration) -> Result<()> {
    open(xml, "dl", &[("class", "enumeration")])?;
    for (raw, shown) in enumeration.entries() {
        write_text_element(xml, "dt", &[], raw)?;
        write_text_element(xml, "dd", &[], shown)?;
    }
    close(xml, "dl")
}
