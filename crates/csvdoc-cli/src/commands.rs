use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use csvdoc_ingest::read_table;
use csvdoc_model::ReportWarning;
use csvdoc_report::RenderOptions;
use tracing::{info_span, warn};

use csvdoc_cli::pipeline::{
    WarningFormat, check_inputs, default_template_text, default_title, format_warnings,
    load_inputs, render_report, write_output,
};

use crate::cli::{CheckArgs, RenderArgs, TemplateArgs, WarningFormatArg};

/// Outcome of `csvdoc check`.
pub struct CheckResult {
    pub data: PathBuf,
    pub template: Option<PathBuf>,
    pub properties: usize,
    pub records: usize,
    pub warnings: Vec<ReportWarning>,
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let span = info_span!("render", data = %args.data.display());
    let _guard = span.enter();

    let inputs = load_inputs(&args.data, args.template.as_deref())?;
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| default_title(&args.data));
    let timestamp = args.timestamp.then(|| Local::now().naive_local());
    let options = RenderOptions::new(title)
        .with_timestamp(timestamp)
        .with_exclude_other(args.exclude_other)
        .with_include_hidden(args.include_hidden);

    let report = render_report(&inputs, &options)?;
    write_output(args.output.as_deref(), &report.html)?;

    if args.no_warnings {
        if !report.warnings.is_empty() {
            warn!(count = report.warnings.len(), "warnings suppressed");
        }
        return Ok(());
    }
    let format = match args.warnings_format {
        WarningFormatArg::Text => WarningFormat::Text,
        WarningFormatArg::Json => WarningFormat::Json,
    };
    if !report.warnings.is_empty() || format == WarningFormat::Json {
        let text = format_warnings(&report.warnings, format)?;
        io::stderr()
            .write_all(text.as_bytes())
            .context("write warnings")?;
    }
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let table =
        read_table(&args.data).with_context(|| format!("read data {}", args.data.display()))?;
    let text = default_template_text(&table)?;
    print!("{text}");
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", data = %args.data.display());
    let _guard = span.enter();

    let inputs = load_inputs(&args.data, args.template.as_deref())?;
    let options = RenderOptions::new(default_title(&args.data))
        .with_exclude_other(args.exclude_other)
        .with_include_hidden(args.include_hidden);
    let warnings = check_inputs(&inputs, &options)?;
    Ok(CheckResult {
        data: args.data.clone(),
        template: args.template.clone(),
        properties: inputs.table.properties().len(),
        records: inputs.table.len(),
        warnings,
    })
}
