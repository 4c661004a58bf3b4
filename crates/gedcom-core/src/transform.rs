//! Line classifier and transformer driver.
//!
//! A single forward pass over the input. Every line is tokenized, classified
//! and then written unchanged, rewritten, or suppressed. `OBJE` sub-trees are
//! collected into object records that are written right before `TRLR`.
//!
//! Output lines are flushed as soon as they are written; the only buffered
//! state is the list of finalized objects waiting for the trailer.

use std::io::{BufRead, Write};

use gedcom_model::{DateDiagnostic, GedcomError, GedcomLine, Result, TransformReport, parse_line};
use tracing::{debug, info, warn};

use crate::date::normalize_date;
use crate::media::{MediaRestructurer, ObjectBuilder};
use crate::options::{MAX_OBJECT_BASE_LEVEL, TransformOptions};

/// What to do with a line read outside an object sub-tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    PassThrough,
    Suppress(&'static str),
    NormalizeDate,
    OpenObject,
    Trailer,
}

/// Classify a line read outside an object sub-tree.
pub fn classify(line: &GedcomLine) -> LineAction {
    match (line.tag.as_str(), line.level) {
        ("_APID", _) => LineAction::Suppress("_APID"),
        ("PAGE", 2) => LineAction::Suppress("PAGE"),
        ("DATA", 2) => LineAction::Suppress("DATA"),
        ("TEXT", 3) => LineAction::Suppress("TEXT"),
        ("DATE", _) if line.has_value() => LineAction::NormalizeDate,
        ("OBJE", _) => LineAction::OpenObject,
        ("TRLR", _) => LineAction::Trailer,
        _ => LineAction::PassThrough,
    }
}

#[derive(Debug)]
enum DriverState {
    Normal,
    InObject(ObjectBuilder),
}

/// Per-run transformer state.
pub struct Transformer<W: Write> {
    writer: W,
    options: TransformOptions,
    state: DriverState,
    media: MediaRestructurer,
    report: TransformReport,
}

impl<W: Write> Transformer<W> {
    /// # Errors
    ///
    /// Fails when `options` do not pass [`TransformOptions::validate`].
    pub fn new(writer: W, options: TransformOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            writer,
            options,
            state: DriverState::Normal,
            media: MediaRestructurer::new(),
            report: TransformReport::default(),
        })
    }

    /// Process one raw line (without terminator).
    ///
    /// Returns the diagnostic of a rewritten `DATE` line in verbose mode.
    ///
    /// # Errors
    ///
    /// Fails on a malformed line or a write error; the run must then be abandoned.
    pub fn process_line(&mut self, raw: &[u8]) -> Result<Option<DateDiagnostic>> {
        self.report.lines_read += 1;
        let line = parse_line(raw, self.report.lines_read)?;

        match std::mem::replace(&mut self.state, DriverState::Normal) {
            DriverState::InObject(builder) if builder.is_closed_by(&line) => {
                self.close_object(builder)?;
                self.dispatch(&line)
            }
            DriverState::InObject(mut builder) => {
                builder.absorb(&line);
                self.suppress(&line, "OBJE sub-tree");
                self.state = DriverState::InObject(builder);
                Ok(None)
            }
            DriverState::Normal => self.dispatch(&line),
        }
    }

    /// Close any open sub-tree, flush leftover objects and return the report.
    ///
    /// # Errors
    ///
    /// Fails when the final writes or the flush fail.
    pub fn finish(mut self) -> Result<TransformReport> {
        if let DriverState::InObject(builder) =
            std::mem::replace(&mut self.state, DriverState::Normal)
        {
            self.close_object(builder)?;
        }
        if !self.media.pending().is_empty() {
            warn!(
                pending = self.media.pending().len(),
                trailer_seen = self.report.trailer_seen,
                "object records pending at end of input, writing them at end of output"
            );
            self.flush_objects()?;
        }
        self.writer.flush()?;
        self.report.objects_created = self.media.created();
        Ok(self.report)
    }

    fn dispatch(&mut self, line: &GedcomLine) -> Result<Option<DateDiagnostic>> {
        match classify(line) {
            LineAction::PassThrough => self.write_line(&line.raw)?,
            LineAction::Suppress(rule) => self.suppress(line, rule),
            LineAction::NormalizeDate => return self.rewrite_date(line),
            LineAction::OpenObject => {
                let builder =
                    self.media
                        .open(line.level)
                        .ok_or_else(|| GedcomError::MalformedLine {
                            line_number: line.line_number,
                            content: String::from_utf8_lossy(&line.raw).into_owned(),
                        })?;
                debug!(line = line.line_number, id = builder.id(), "object sub-tree opened");
                self.report.lines_suppressed += 1;
                self.state = DriverState::InObject(builder);
            }
            LineAction::Trailer => {
                self.report.trailer_seen = true;
                self.flush_objects()?;
                self.write_line(&line.raw)?;
            }
        }
        Ok(None)
    }

    fn rewrite_date(&mut self, line: &GedcomLine) -> Result<Option<DateDiagnostic>> {
        let normalized = normalize_date(&line.value);
        self.report.dates_normalized += 1;
        if normalized.failed {
            self.report.dates_failed += 1;
            warn!(
                line = line.line_number,
                value = %line.value,
                "date could not be parsed, keeping original text"
            );
        }
        let rewritten = format!("{} {} {}", line.level, line.tag, normalized.output);
        self.write_line(rewritten.as_bytes())?;
        if !self.options.verbose {
            return Ok(None);
        }
        info!(
            line = line.line_number,
            tag = %line.tag,
            before = %line.value,
            after = %normalized.output,
            failed = normalized.failed,
            "date normalized"
        );
        let diagnostic = DateDiagnostic {
            line_number: line.line_number,
            tag: line.tag.clone(),
            input: line.value.clone(),
            output: normalized.output,
            failed: normalized.failed,
        };
        self.report.diagnostics.push(diagnostic.clone());
        Ok(Some(diagnostic))
    }

    fn close_object(&mut self, builder: ObjectBuilder) -> Result<()> {
        let id = builder.id();
        let reference = self.media.close(builder);
        debug!(id, "object sub-tree closed");
        self.write_line(reference.as_bytes())
    }

    fn flush_objects(&mut self) -> Result<()> {
        let base_level = self.options.object_base_level;
        let record_lines =
            self.media
                .flush(base_level)
                .ok_or(GedcomError::ObjectLevelOutOfRange {
                    level: base_level,
                    max: MAX_OBJECT_BASE_LEVEL,
                })?;
        for record_line in record_lines {
            self.write_line(record_line.as_bytes())?;
        }
        Ok(())
    }

    fn suppress(&mut self, line: &GedcomLine, rule: &str) {
        self.report.lines_suppressed += 1;
        debug!(line = line.line_number, tag = %line.tag, rule, "line suppressed");
    }

    fn write_line(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.write_all(self.options.line_ending.as_bytes())?;
        self.writer.flush()?;
        self.report.lines_written += 1;
        Ok(())
    }
}

/// Transform a whole GEDCOM stream.
///
/// # Errors
///
/// Returns invalid options, the first malformed line or an I/O error; output
/// written up to that point is incomplete.
pub fn transform<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    options: TransformOptions,
) -> Result<TransformReport> {
    transform_with(reader, writer, options, |_| {})
}

/// Like [`transform`], calling `on_date` for each `DATE` diagnostic as soon as
/// its line has been written (verbose mode only).
///
/// # Errors
///
/// Same as [`transform`].
pub fn transform_with<R: BufRead, W: Write>(
    mut reader: R,
    writer: W,
    options: TransformOptions,
    mut on_date: impl FnMut(&DateDiagnostic),
) -> Result<TransformReport> {
    let mut transformer = Transformer::new(writer, options)?;
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        if let Some(diagnostic) = transformer.process_line(strip_terminator(&buffer))? {
            on_date(&diagnostic);
        }
    }
    transformer.finish()
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
