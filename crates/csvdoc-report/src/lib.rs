//! HTML report rendering for csvdoc.
//!
//! [`render`] cross-validates a [`DisplaySpec`](csvdoc_model::DisplaySpec)
//! against a [`Table`](csvdoc_model::Table), orders the records and writes a
//! standalone HTML document with a records section and a properties section.
//! Non-fatal findings come back as
//! [`ReportWarning`](csvdoc_model::ReportWarning)s and are never written into
//! the document.

mod context;
mod error;
mod html;
mod options;
mod order;
mod properties;
mod records;
mod render;

pub use error::{RenderError, Result};
pub use options::RenderOptions;
pub use order::{compare_records, sort_records};
pub use render::{RenderedReport, TIMESTAMP_FORMAT, render, render_to};
