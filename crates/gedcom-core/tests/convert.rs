//! Tests for file-level conversion.

use std::fs;
use std::path::{Path, PathBuf};

use gedcom_core::{TransformOptions, convert_file, convert_file_with};
use gedcom_model::GedcomError;

fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn converts_into_timestamped_sibling_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("family.ged");
    fs::write(&input, "0 HEAD\n1 BIRT\n2 DATE 3.7.1899\n0 TRLR\n").expect("write input");

    let outcome = convert_file(&input, None, &TransformOptions::default()).expect("convert");

    assert_eq!(outcome.input, input);
    assert_eq!(outcome.output.parent(), Some(dir.path()));
    let name = outcome
        .output
        .file_name()
        .and_then(|name| name.to_str())
        .expect("file name");
    assert!(name.starts_with("family.ged-"));
    assert!(name.ends_with(".ged"));
    assert_eq!(name.len(), "family.ged-".len() + 14 + ".ged".len());

    let written = fs::read_to_string(&outcome.output).expect("read output");
    assert_eq!(written, "0 HEAD\n1 BIRT\n2 DATE 03 JUL 1899\n0 TRLR\n");
    assert_eq!(outcome.report.dates_normalized, 1);
}

#[test]
fn output_dir_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("tree.ged");
    fs::write(&input, "0 HEAD\n0 TRLR\n").expect("write input");

    let outcome = convert_file(&input, Some(out_dir.path()), &TransformOptions::default())
        .expect("convert");

    assert_eq!(outcome.output.parent(), Some(out_dir.path()));
    assert_eq!(dir_entries(dir.path()), vec![input]);
}

#[test]
fn missing_input_creates_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("missing.ged");

    let err = convert_file(&input, None, &TransformOptions::default()).unwrap_err();

    assert!(matches!(err, GedcomError::InputNotFound { .. }));
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn directory_input_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = convert_file(dir.path(), None, &TransformOptions::default()).unwrap_err();
    assert!(matches!(err, GedcomError::InputNotFound { .. }));
}

#[test]
fn malformed_input_leaves_no_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("broken.ged");
    fs::write(&input, "0 HEAD\n1 NAME x\nabc FOO\n0 TRLR\n").expect("write input");

    let err = convert_file(&input, None, &TransformOptions::default()).unwrap_err();

    assert!(err.is_malformed_input());
    assert_eq!(dir_entries(dir.path()), vec![input]);
}

#[test]
fn invalid_object_level_creates_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("family.ged");
    fs::write(&input, "0 HEAD\n1 OBJE\n2 TITL X\n0 TRLR\n").expect("write input");

    let options = TransformOptions::default().with_object_base_level(u32::MAX);
    let err = convert_file(&input, None, &options).unwrap_err();

    assert!(matches!(err, GedcomError::ObjectLevelOutOfRange { .. }));
    assert_eq!(dir_entries(dir.path()), vec![input]);
}

#[test]
fn date_diagnostics_stream_while_converting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("family.ged");
    fs::write(&input, "0 HEAD\n2 DATE 3.7.1899\nbad\n").expect("write input");

    let mut echoed = Vec::new();
    let err = convert_file_with(&input, None, &TransformOptions::default(), |diagnostic| {
        echoed.push(format!("{}:{}", diagnostic.line_number, diagnostic.output));
    })
    .unwrap_err();

    assert!(err.is_malformed_input());
    assert_eq!(echoed, vec!["2:03 JUL 1899".to_string()]);
    assert_eq!(dir_entries(dir.path()), vec![input]);
}
