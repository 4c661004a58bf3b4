//! Tests for CLI library components.

use std::fs;

use clap::Parser;
use gedcom_cli::cli::Cli;
use gedcom_cli::logging::{LogConfig, LogFormat, filter_directives};
use gedcom_cli::report::write_report_json;
use gedcom_model::{DateDiagnostic, TransformReport};
use tracing::level_filters::LevelFilter;

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn defaults_match_a_plain_run() {
    let cli = Cli::try_parse_from(["gedcom-convert", "-r", "family.ged"]).expect("parse");
    assert!(cli.diagnostics);
    assert_eq!(cli.object_level, 0);
    assert!(!cli.crlf);
    assert!(cli.output_dir.is_none());
    assert!(!cli.log_timestamps);
}

#[test]
fn diagnostics_can_be_switched_off() {
    let cli = Cli::try_parse_from(["gedcom-convert", "-r", "f.ged", "--diagnostics", "false"])
        .expect("parse");
    assert!(!cli.diagnostics);
}

#[test]
fn object_level_is_bounded() {
    let cli = Cli::try_parse_from(["gedcom-convert", "-r", "f.ged", "--object-level", "96"])
        .expect("parse");
    assert_eq!(cli.object_level, 96);

    for level in ["97", "4294967295"] {
        assert!(
            Cli::try_parse_from(["gedcom-convert", "-r", "f.ged", "--object-level", level])
                .is_err(),
            "level {level} accepted"
        );
    }
}

#[test]
fn input_is_required() {
    assert!(Cli::try_parse_from(["gedcom-convert"]).is_err());
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn filter_directives_scope_level_to_workspace_crates() {
    assert_eq!(
        filter_directives(LevelFilter::DEBUG),
        "warn,gedcom_cli=debug,gedcom_core=debug,gedcom_model=debug"
    );
}

#[test]
fn default_config_logs_info_to_stderr_in_compact_form() {
    let config = LogConfig::default();
    assert_eq!(config.level_filter, LevelFilter::INFO);
    assert_eq!(config.format, LogFormat::Compact);
    assert!(config.use_env_filter);
    assert!(!config.with_timestamps);
    assert!(!config.with_target);
    assert!(config.log_file.is_none());
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn report_is_written_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    let report = TransformReport {
        lines_read: 12,
        lines_written: 10,
        dates_normalized: 1,
        dates_failed: 1,
        trailer_seen: true,
        diagnostics: vec![DateDiagnostic {
            line_number: 4,
            tag: "DATE".to_string(),
            input: "Ostern 1900".to_string(),
            output: "OSTERN 1900".to_string(),
            failed: true,
        }],
        ..TransformReport::default()
    };

    write_report_json(&path, &report).expect("write report");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read report")).expect("json");
    assert_eq!(value["lines_read"], 12);
    assert_eq!(value["dates_failed"], 1);
    assert_eq!(value["trailer_seen"], true);
    assert_eq!(value["diagnostics"][0]["line_number"], 4);
    assert_eq!(value["diagnostics"][0]["failed"], true);
}

#[test]
fn report_into_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope").join("report.json");
    let err = write_report_json(&path, &TransformReport::default()).unwrap_err();
    assert!(err.to_string().contains("report.json"));
}
