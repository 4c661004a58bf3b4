//! Run configuration for the transformer.

use gedcom_model::{GedcomError, MAX_LEVEL, Result};

/// Deepest base level whose four-line object record still fits within
/// [`MAX_LEVEL`].
pub const MAX_OBJECT_BASE_LEVEL: u32 = MAX_LEVEL - 3;

/// Terminator written after every output line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
        }
    }
}

/// Options for one transformation run.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Collect and log per-line `DATE` diagnostics.
    pub verbose: bool,
    /// Level of the `OBJE` header line of flushed object records.
    pub object_base_level: u32,
    pub line_ending: LineEnding,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            verbose: true,
            object_base_level: 0,
            line_ending: LineEnding::default(),
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_verbose(mut self, enable: bool) -> Self {
        self.verbose = enable;
        self
    }

    #[must_use]
    pub fn with_object_base_level(mut self, level: u32) -> Self {
        self.object_base_level = level;
        self
    }

    /// Reject settings that cannot produce a valid file.
    ///
    /// # Errors
    ///
    /// [`GedcomError::ObjectLevelOutOfRange`] when `object_base_level`
    /// exceeds [`MAX_OBJECT_BASE_LEVEL`].
    pub fn validate(&self) -> Result<()> {
        if self.object_base_level > MAX_OBJECT_BASE_LEVEL {
            return Err(GedcomError::ObjectLevelOutOfRange {
                level: self.object_base_level,
                max: MAX_OBJECT_BASE_LEVEL,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
