//! GEDCOM record transformer.
//!
//! Rewrites a GEDCOM file in one pass:
//!
//! - `DATE` values are normalized to `[EST|BEF|AFT|ABT ]DD MMM YYYY` style
//!   ([`date`], [`months`]).
//! - Embedded `OBJE` sub-trees become pointers to top-level object records
//!   written before the trailer ([`media`]).
//! - A few vendor or redundant lines are dropped ([`transform`]).
//!
//! # Example
//!
//! ```
//! use gedcom_core::{TransformOptions, transform};
//!
//! let input = b"0 HEAD\n1 BIRT\n2 DATE 12.03.1850\n0 TRLR\n";
//! let mut output = Vec::new();
//! let report = transform(&input[..], &mut output, TransformOptions::default()).unwrap();
//!
//! assert_eq!(output, b"0 HEAD\n1 BIRT\n2 DATE 12 MAR 1850\n0 TRLR\n");
//! assert_eq!(report.dates_normalized, 1);
//! ```

pub mod convert;
pub mod date;
pub mod media;
pub mod months;
pub mod options;
pub mod transform;

pub use convert::{ConvertOutcome, convert_file, convert_file_with, output_path_for};
pub use date::{NormalizedDate, normalize_date, normalize_date_body};
pub use months::abbreviate_months;
pub use options::{LineEnding, MAX_OBJECT_BASE_LEVEL, TransformOptions};
pub use transform::{LineAction, Transformer, classify, transform, transform_with};
