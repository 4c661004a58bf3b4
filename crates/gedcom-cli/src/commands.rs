use anyhow::{Context, Result};
use tracing::info;

use gedcom_cli::cli::Cli;
use gedcom_cli::report::write_report_json;
use gedcom_core::{ConvertOutcome, LineEnding, TransformOptions, convert_file_with};

use crate::summary::print_diagnostic;

pub fn run_convert(cli: &Cli) -> Result<ConvertOutcome> {
    let options = TransformOptions::default()
        .with_verbose(cli.diagnostics)
        .with_object_base_level(cli.object_level)
        .with_line_ending(if cli.crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        });
    info!(input = %cli.input.display(), "converting");
    let outcome = convert_file_with(
        &cli.input,
        cli.output_dir.as_deref(),
        &options,
        print_diagnostic,
    )
    .with_context(|| format!("convert {}", cli.input.display()))?;
    if let Some(path) = &cli.report {
        write_report_json(path, &outcome.report)?;
    }
    Ok(outcome)
}
