//! CLI argument definitions for the GEDCOM converter.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use gedcom_core::MAX_OBJECT_BASE_LEVEL;

#[derive(Parser)]
#[command(
    name = "gedcom-convert",
    version,
    about = "Normalize GEDCOM dates and restructure embedded multimedia objects",
    long_about = "Rewrite a GEDCOM file into a new timestamped copy.\n\n\
                  DATE values are normalized to GEDCOM form (e.g. `15. Januar 1980` \
                  becomes `15 JAN 1980`), embedded OBJE sub-trees are replaced by \
                  pointers to top-level object records, and vendor lines such as \
                  _APID are dropped."
)]
pub struct Cli {
    /// GEDCOM file to convert.
    #[arg(short = 'r', long = "read", value_name = "FILE")]
    pub input: PathBuf,

    /// Echo per-line DATE diagnostics (line, tag, before, after, failed).
    #[arg(
        long = "diagnostics",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub diagnostics: bool,

    /// Directory for the converted file (default: next to the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Level of the OBJE header line of generated object records.
    #[arg(
        long = "object-level",
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_OBJECT_BASE_LEVEL))
    )]
    pub object_level: u32,

    /// Write CRLF line endings instead of LF.
    #[arg(long = "crlf")]
    pub crlf: bool,

    /// Write the run report as JSON to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log events with a timestamp.
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the emitting module in log events.
    #[arg(long = "log-targets")]
    pub log_targets: bool,
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
