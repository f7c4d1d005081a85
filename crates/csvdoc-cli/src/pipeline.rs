//! Load, render and write steps shared by the subcommands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csvdoc_ingest::read_table;
use csvdoc_model::{DisplaySpec, ReportWarning, Table};
use csvdoc_report::{RenderOptions, RenderedReport, render, render_to};
use csvdoc_template::{default_template, read_template, write_template};
use tracing::{debug, info};

/// Title used when the data path has no usable file stem.
pub const FALLBACK_TITLE: &str = "Report";

/// Data and template, loaded and parsed.
#[derive(Debug)]
pub struct Inputs {
    pub data_path: PathBuf,
    pub table: Table,
    pub spec: DisplaySpec,
}

/// How warnings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WarningFormat {
    /// One `warning: ...` line each.
    #[default]
    Text,
    /// A JSON array.
    Json,
}

/// Load the data file and the template, or synthesize a default template.
pub fn load_inputs(data: &Path, template: Option<&Path>) -> Result<Inputs> {
    let table = read_table(data).with_context(|| format!("read data {}", data.display()))?;
    info!(
        path = %data.display(),
        properties = table.properties().len(),
        records = table.len(),
        "loaded data"
    );
    let spec = match template {
        Some(path) => {
            read_template(path).with_context(|| format!("read template {}", path.display()))?
        }
        None => {
            debug!("no template given, using default");
            default_template(&table)
        }
    };
    Ok(Inputs {
        data_path: data.to_path_buf(),
        table,
        spec,
    })
}

/// Default report title: the data file name without extension.
pub fn default_title(data: &Path) -> String {
    data.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

pub fn render_report(inputs: &Inputs, options: &RenderOptions) -> Result<RenderedReport> {
    render(&inputs.table, &inputs.spec, options)
        .with_context(|| format!("render {}", inputs.data_path.display()))
}

/// Validate inputs and collect warnings without keeping any output.
///
/// `options` decide which properties are listed, and so which enumeration
/// misses are reported.
pub fn check_inputs(inputs: &Inputs, options: &RenderOptions) -> Result<Vec<ReportWarning>> {
    render_to(io::sink(), &inputs.table, &inputs.spec, options)
        .with_context(|| format!("check {}", inputs.data_path.display()))
}

/// Write the report to `path`, or stdout when `None`.
pub fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = html.len(), "wrote report");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write report to stdout")?;
        }
    }
    Ok(())
}

/// Default template for a data file, as template CSV text.
pub fn default_template_text(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_template(&mut buffer, &default_template(table)).context("write template")?;
    String::from_utf8(buffer).context("template is not UTF-8")
}

pub fn format_warnings(warnings: &[ReportWarning], format: WarningFormat) -> Result<String> {
    match format {
        WarningFormat::Text => Ok(warnings
            .iter()
            .map(|warning| format!("warning: {warning}\n"))
            .collect()),
        WarningFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(warnings).context("serialize warnings")?;
            json.push('\n');
            Ok(json)
        }
    }
}
