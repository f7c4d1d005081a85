//! CLI argument definitions for csvdoc.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvdoc",
    version,
    about = "Render CSV records as an HTML report",
    long_about = "Render the records of a CSV file as a standalone HTML report.\n\n\
                  A template, itself a CSV file, chooses labels, groups, sort order,\n\
                  record identifiers and value enumerations. Without a template every\n\
                  column is shown as-is."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a report for a data file.
    Render(RenderArgs),

    /// Print a starting template for a data file.
    Template(TemplateArgs),

    /// Validate a data file against a template and list warnings.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// CSV data file; the first row names the properties.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Template CSV file (default: show every property).
    #[arg(long = "template", short = 't', value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Title used when the template has none (default: data file name).
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Show the generation time in the report footer.
    #[arg(long = "timestamp")]
    pub timestamp: bool,

    /// Leave `_OTHER` properties out of the properties section.
    #[arg(long = "exclude-other")]
    pub exclude_other: bool,

    /// Include `_HIDE` properties in the properties section.
    #[arg(long = "include-hidden")]
    pub include_hidden: bool,

    /// Do not print warnings.
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    /// Warning output format on stderr.
    #[arg(long = "warnings-format", value_enum, default_value = "text")]
    pub warnings_format: WarningFormatArg,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// CSV data file to derive the template from.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV data file.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Template CSV file (default: show every property).
    #[arg(long = "template", short = 't', value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Check as if rendering with `--exclude-other`.
    #[arg(long = "exclude-other")]
    pub exclude_other: bool,

    /// Check as if rendering with `--include-hidden`.
    #[arg(long = "include-hidden")]
    pub include_hidden: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WarningFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
