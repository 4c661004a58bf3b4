//! CLI library components for the GEDCOM converter.

pub mod cli;
pub mod logging;
pub mod report;
