//! Small helpers over the quick-xml writer for emitting HTML.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, write_error};

pub(crate) type HtmlWriter<W> = Writer<W>;

pub(crate) fn html_writer<W: Write>(inner: W) -> HtmlWriter<W> {
    Writer::new_with_indent(inner, b' ', 2)
}

fn emit<W: Write>(writer: &mut HtmlWriter<W>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(write_error)
}

fn start_tag<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut tag = BytesStart::new(name);
    for attr in attrs {
        tag.push_attribute(*attr);
    }
    tag
}

pub(crate) fn write_doctype<W: Write>(writer: &mut HtmlWriter<W>) -> Result<()> {
    emit(writer, Event::DocType(BytesText::from_escaped("html")))
}

pub(crate) fn open<W: Write>(
    writer: &mut HtmlWriter<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    emit(writer, Event::Start(start_tag(name, attrs)))
}

pub(crate) fn close<W: Write>(writer: &mut HtmlWriter<W>, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// Writes a void element such as `<meta>`.
pub(crate) fn write_void<W: Write>(
    writer: &mut HtmlWriter<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    emit(writer, Event::Empty(start_tag(name, attrs)))
}

/// Write a simple text element.
pub(crate) fn write_text_element<W: Write>(
    writer: &mut HtmlWriter<W>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    open(writer, name, attrs)?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    close(writer, name)
}

/// Writes `text` without escaping. Only for trusted constant content.
pub(crate) fn write_raw_element<W: Write>(
    writer: &mut HtmlWriter<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    open(writer, name, &[])?;
    emit(writer, Event::Text(BytesText::from_escaped(text)))?;
    close(writer, name)
}

/// Writes `<a href="#anchor">text</a>`.
pub(crate) fn write_link<W: Write>(
    writer: &mut HtmlWriter<W>,
    anchor: &str,
    text: &str,
) -> Result<()> {
    let href = format!("#{anchor}");
    write_text_element(writer, "a", &[("href", href.as_str())], text)
}
