//! File-level conversion: output naming and cleanup on abort.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use gedcom_model::{DateDiagnostic, GedcomError, Result, TransformReport};
use tracing::{info, info_span, warn};

use crate::options::TransformOptions;
use crate::transform::transform_with;

/// Timestamp appended to output file names.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: TransformReport,
}

/// Output path `<name>-<yyyyMMddHHmmss><ext>` next to the input, or in `output_dir`.
///
/// The full input file name, extension included, is kept as the stem:
/// `family.ged` becomes `family.ged-20240101120000.ged`.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, now: NaiveDateTime) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let file_name = format!(
        "{name}-{}{extension}",
        now.format(OUTPUT_TIMESTAMP_FORMAT)
    );
    let dir = output_dir.or_else(|| input.parent()).unwrap_or(Path::new(""));
    dir.join(file_name)
}

/// Convert `input` into a new timestamped file.
///
/// Nothing is created when the input does not exist or `options` are
/// invalid. When the run aborts the partially written output is removed.
///
/// # Errors
///
/// [`GedcomError::InputNotFound`], [`GedcomError::ObjectLevelOutOfRange`],
/// [`GedcomError::MalformedLine`], or I/O errors.
pub fn convert_file(
    input: &Path,
    output_dir: Option<&Path>,
    options: &TransformOptions,
) -> Result<ConvertOutcome> {
    convert_file_with(input, output_dir, options, |_| {})
}

/// Like [`convert_file`], passing each `DATE` diagnostic to `on_date` while
/// the file is being written.
///
/// # Errors
///
/// Same as [`convert_file`].
pub fn convert_file_with(
    input: &Path,
    output_dir: Option<&Path>,
    options: &TransformOptions,
    on_date: impl FnMut(&DateDiagnostic),
) -> Result<ConvertOutcome> {
    options.validate()?;
    if !input.is_file() {
        return Err(GedcomError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let output = output_path_for(input, output_dir, Local::now().naive_local());
    let span = info_span!("convert", input = %input.display(), output = %output.display());
    let _guard = span.enter();

    let reader = BufReader::new(File::open(input)?);
    let file = File::create(&output).map_err(|source| GedcomError::FileCreate {
        path: output.clone(),
        source,
    })?;

    match transform_with(reader, BufWriter::new(file), options.clone(), on_date) {
        Ok(report) => {
            info!(
                lines_read = report.lines_read,
                lines_written = report.lines_written,
                dates = report.dates_normalized,
                dates_failed = report.dates_failed,
                objects = report.objects_created,
                "conversion complete"
            );
            Ok(ConvertOutcome {
                input: input.to_path_buf(),
                output,
                report,
            })
        }
        Err(error) => {
            warn!(
                %error,
                malformed_input = error.is_malformed_input(),
                "conversion aborted, removing partial output"
            );
            fs::remove_file(&output).map_err(|source| GedcomError::FileRemove {
                path: output.clone(),
                source,
            })?;
            Err(error)
        }
    }
}
