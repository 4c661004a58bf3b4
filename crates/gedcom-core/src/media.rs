//! Multimedia sub-tree restructuring.
//!
//! An embedded `OBJE` sub-tree is replaced by a pointer line and its content
//! is moved into a top-level object record written before the trailer:
//!
//! ```text
//! 1 OBJE                  2 OBJE @O1@          (inline, at the close point)
//! 2 FORM jpg      ==>     ...
//! 2 TITL My Photo         0 OBJE @O1@          (before 0 TRLR)
//!                         1 FILE My Photo.jpg
//!                         2 FORM jpg
//!                         3 TYPE photo
//! ```

use gedcom_model::{GedcomLine, MediaObject, object_xref};

/// Classification written to every object record.
pub const DEFAULT_MEDIA_TYPE: &str = "photo";

/// Maximum length of a sanitized file title.
pub const MAX_TITLE_LENGTH: usize = 49;

/// Keep letters, digits and spaces, then truncate to [`MAX_TITLE_LENGTH`].
///
/// ```
/// use gedcom_core::media::sanitize_title;
///
/// assert_eq!(sanitize_title("My Photo!"), "My Photo");
/// assert_eq!(sanitize_title("Grab (1890) - Friedhof"), "Grab 1890  Friedhof");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .take(MAX_TITLE_LENGTH)
        .collect()
}

/// Inline pointer line written where the sub-tree was.
pub fn reference_line(level: u32, id: u32) -> String {
    format!("{level} OBJE {}", object_xref(id))
}

/// The four lines of a top-level object record, or `None` when the nested
/// levels would not fit in a `u32`.
pub fn object_record_lines(object: &MediaObject, base_level: u32) -> Option<[String; 4]> {
    let deepest = base_level.checked_add(3)?;
    Some([
        format!("{base_level} OBJE {}", object.xref()),
        format!("{} FILE {}", base_level + 1, object.file_name()),
        format!("{} FORM {}", base_level + 2, object.form),
        format!("{deepest} TYPE {}", object.media_type),
    ])
}

/// An object whose sub-tree is still being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBuilder {
    id: u32,
    child_level: u32,
    title: Option<String>,
    form: Option<String>,
}

impl ObjectBuilder {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Level of the sub-tree's immediate children.
    pub fn child_level(&self) -> u32 {
        self.child_level
    }

    /// Whether `line` ends the sub-tree (a sibling of `OBJE` or shallower).
    pub fn is_closed_by(&self, line: &GedcomLine) -> bool {
        line.level < self.child_level
    }

    /// Take `FORM`/`TITL` from an immediate child; everything else is dropped.
    pub fn absorb(&mut self, line: &GedcomLine) {
        if line.level != self.child_level {
            return;
        }
        match line.tag.as_str() {
            "FORM" => self.form = Some(line.value.clone()),
            "TITL" => self.title = Some(line.value.clone()),
            _ => {}
        }
    }

    fn build(self) -> MediaObject {
        MediaObject {
            id: self.id,
            file: sanitize_title(self.title.as_deref().unwrap_or_default()),
            form: self.form.unwrap_or_default(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
        }
    }
}

/// Id counter and finalized objects awaiting the trailer.
#[derive(Debug, Default)]
pub struct MediaRestructurer {
    last_id: u32,
    pending: Vec<MediaObject>,
}

impl MediaRestructurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an object for an `OBJE` line at `level`.
    ///
    /// Returns `None` when `level` has no child level; no id is consumed then.
    pub fn open(&mut self, level: u32) -> Option<ObjectBuilder> {
        let child_level = level.checked_add(1)?;
        self.last_id += 1;
        Some(ObjectBuilder {
            id: self.last_id,
            child_level,
            title: None,
            form: None,
        })
    }

    /// Finalize an object and return its inline pointer line.
    pub fn close(&mut self, builder: ObjectBuilder) -> String {
        let line = reference_line(builder.child_level, builder.id);
        self.pending.push(builder.build());
        line
    }

    /// Objects finalized but not yet flushed.
    pub fn pending(&self) -> &[MediaObject] {
        &self.pending
    }

    /// Number of objects opened so far.
    pub fn created(&self) -> usize {
        self.last_id as usize
    }

    /// Drain pending objects as record lines rooted at `base_level`.
    ///
    /// Returns `None`, leaving the pending objects in place, when the record
    /// levels would overflow.
    pub fn flush(&mut self, base_level: u32) -> Option<Vec<String>> {
        base_level.checked_add(3)?;
        Some(
            self.pending
                .drain(..)
                .filter_map(|object| object_record_lines(&object, base_level))
                .flatten()
                .collect(),
        )
    }
}
