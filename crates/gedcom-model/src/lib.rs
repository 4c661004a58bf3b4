pub mod date;
pub mod error;
pub mod line;
pub mod media;
pub mod report;

pub use date::{DateQualifier, split_qualifier};
pub use error::{GedcomError, Result};
pub use line::{GedcomLine, MAX_LEVEL, UTF8_BOM, parse_line};
pub use media::{MediaObject, object_xref};
pub use report::{DateDiagnostic, TransformReport};
