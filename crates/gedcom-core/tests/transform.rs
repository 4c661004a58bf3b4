//! End-to-end tests for the line transformer.

use gedcom_core::{LineEnding, MAX_OBJECT_BASE_LEVEL, TransformOptions, transform, transform_with};
use gedcom_model::{DateDiagnostic, GedcomError, TransformReport};
use proptest::prelude::*;

fn run(input: &str) -> (String, TransformReport) {
    run_with(input, TransformOptions::default())
}

fn run_with(input: &str, options: TransformOptions) -> (String, TransformReport) {
    let mut output = Vec::new();
    let report = transform(input.as_bytes(), &mut output, options).expect("transform");
    (String::from_utf8(output).expect("utf-8 output"), report)
}

const SAMPLE: &str = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
1 _APID 1,7602::1
1 BIRT
2 DATE 15. Januar 1980
2 SOUR @S1@
3 PAGE 12
2 PAGE 34
2 DATA
3 TEXT Birth register
1 OBJE
2 FORM jpg
2 TITL My, Photo!
2 FILE c:\\photos\\my photo.jpg
2 _TYPE PHOTO
1 NOTE Family portrait
0 TRLR
";

#[test]
fn sample_file_snapshot() {
    let (output, _) = run(SAMPLE);
    insta::assert_snapshot!(output.trim_end(), @r"
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
1 BIRT
2 DATE 15 JAN 1980
2 SOUR @S1@
3 PAGE 12
2 OBJE @O1@
1 NOTE Family portrait
0 OBJE @O1@
1 FILE My Photo.jpg
2 FORM jpg
3 TYPE photo
0 TRLR
");
}

#[test]
fn sample_file_report() {
    let (_, report) = run(SAMPLE);
    assert_eq!(report.lines_read, 19);
    assert_eq!(report.lines_written, 15);
    assert_eq!(report.lines_suppressed, 9);
    assert_eq!(report.dates_normalized, 1);
    assert_eq!(report.dates_failed, 0);
    assert_eq!(report.objects_created, 1);
    assert!(report.trailer_seen);
}

#[test]
fn closing_line_that_opens_an_object_starts_the_next_one() {
    let (output, report) = run("\
0 @I1@ INDI
1 OBJE
2 FORM jpg
2 TITL First
1 OBJE
2 FORM png
2 TITL Second
1 BIRT
0 TRLR
");
    assert_eq!(
        output,
        "\
0 @I1@ INDI
2 OBJE @O1@
2 OBJE @O2@
1 BIRT
0 OBJE @O1@
1 FILE First.jpg
2 FORM jpg
3 TYPE photo
0 OBJE @O2@
1 FILE Second.png
2 FORM png
3 TYPE photo
0 TRLR
"
    );
    assert_eq!(report.objects_created, 2);
}

#[test]
fn shallower_line_closes_object() {
    let (output, _) = run("\
0 @I1@ INDI
1 OBJE
2 TITL Grave
2 FORM bmp
0 @I2@ INDI
0 TRLR
");
    assert!(output.starts_with("0 @I1@ INDI\n2 OBJE @O1@\n0 @I2@ INDI\n0 OBJE @O1@\n"));
    assert!(output.ends_with("1 FILE Grave.bmp\n2 FORM bmp\n3 TYPE photo\n0 TRLR\n"));
}

#[test]
fn lines_inside_object_are_absorbed() {
    let (output, report) = run("\
0 @I1@ INDI
1 OBJE
2 FILE scan.tif
3 FORM tif
2 DATE 1.1.1900
2 TITL Scan
1 NOTE done
0 TRLR
");
    assert!(!output.contains("tif"));
    assert!(!output.contains("DATE"));
    assert!(output.contains("1 FILE Scan.\n"));
    assert_eq!(report.dates_normalized, 0);
}

#[test]
fn closing_line_is_classified_normally() {
    let (output, report) = run("\
0 @I1@ INDI
1 OBJE
2 TITL Photo
1 _APID 1,2::3
1 DEAT
2 DATE ABT 1900
0 TRLR
");
    assert!(!output.contains("_APID"));
    assert!(output.contains("2 OBJE @O1@\n1 DEAT\n2 DATE ABT 1900\n"));
    assert_eq!(report.dates_normalized, 1);
}

#[test]
fn objects_are_flushed_at_end_without_trailer() {
    let (output, report) = run("\
0 @I1@ INDI
1 OBJE
2 TITL Photo
2 FORM jpg
");
    assert_eq!(
        output,
        "\
0 @I1@ INDI
2 OBJE @O1@
0 OBJE @O1@
1 FILE Photo.jpg
2 FORM jpg
3 TYPE photo
"
    );
    assert!(!report.trailer_seen);
}

#[test]
fn object_base_level_is_configurable() {
    let options = TransformOptions::default().with_object_base_level(1);
    let (output, _) = run_with("1 OBJE\n2 TITL X\n2 FORM gif\n0 TRLR\n", options);
    assert!(output.contains("1 OBJE @O1@\n2 FILE X.gif\n3 FORM gif\n4 TYPE photo\n0 TRLR\n"));
}

#[test]
fn suppression_rules() {
    let (output, report) = run("\
1 SOUR @S1@
2 PAGE 1
2 DATA
3 TEXT quoted
3 PAGE 5
1 _APID 1,7602::1
4 TEXT kept
");
    assert_eq!(output, "1 SOUR @S1@\n3 PAGE 5\n4 TEXT kept\n");
    assert_eq!(report.lines_suppressed, 4);
}

#[test]
fn date_lines_are_rewritten_with_parsed_level() {
    let (output, _) = run("02 DATE 12.03.1850\n");
    assert_eq!(output, "2 DATE 12 MAR 1850\n");
}

#[test]
fn empty_date_passes_through() {
    let (output, report) = run("2 DATE\n");
    assert_eq!(output, "2 DATE\n");
    assert_eq!(report.dates_normalized, 0);
}

#[test]
fn failed_dates_are_counted_and_kept() {
    let (output, report) = run("2 DATE 31.02.1900\n");
    assert_eq!(output, "2 DATE 31.02.1900\n");
    assert_eq!(report.dates_failed, 1);
    assert!(report.diagnostics[0].failed);
}

#[test]
fn verbose_mode_collects_diagnostics() {
    let (_, report) = run("0 HEAD\n2 DATE um 1900\n");
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.line_number, 2);
    assert_eq!(diagnostic.tag, "DATE");
    assert_eq!(diagnostic.input, "um 1900");
    assert_eq!(diagnostic.output, "ABT 1900");
    assert!(!diagnostic.failed);
}

#[test]
fn quiet_mode_skips_diagnostics() {
    let options = TransformOptions::default().with_verbose(false);
    let (output, report) = run_with("2 DATE um 1900\n", options);
    assert_eq!(output, "2 DATE ABT 1900\n");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.dates_normalized, 1);
}

#[test]
fn crlf_line_endings() {
    let options = TransformOptions::default().with_line_ending(LineEnding::CrLf);
    let (output, _) = run_with("0 HEAD\r\n0 TRLR\r\n", options);
    assert_eq!(output, "0 HEAD\r\n0 TRLR\r\n");
}

#[test]
fn non_utf8_lines_pass_through_verbatim() {
    let input = b"0 HEAD\n1 NAME J\xF6rg /M\xFCller/\n0 TRLR\n";
    let mut output = Vec::new();
    transform(&input[..], &mut output, TransformOptions::default()).unwrap();
    assert_eq!(output, input.to_vec());
}

#[test]
fn malformed_line_aborts() {
    let mut output = Vec::new();
    let err = transform(
        "0 HEAD\nabc FOO\n0 TRLR\n".as_bytes(),
        &mut output,
        TransformOptions::default(),
    )
    .unwrap_err();
    match err {
        GedcomError::MalformedLine { line_number, .. } => assert_eq!(line_number, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(output, b"0 HEAD\n");
}

#[test]
fn out_of_range_object_level_aborts_instead_of_swallowing_the_rest() {
    let mut output = Vec::new();
    let err = transform(
        "0 HEAD\n4294967295 OBJE\n1 NOTE after\n0 TRLR\n".as_bytes(),
        &mut output,
        TransformOptions::default(),
    )
    .unwrap_err();
    match err {
        GedcomError::MalformedLine { line_number, .. } => assert_eq!(line_number, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(output, b"0 HEAD\n");
}

#[test]
fn deepest_object_base_level_still_fits() {
    let options = TransformOptions::default().with_object_base_level(MAX_OBJECT_BASE_LEVEL);
    let (output, _) = run_with("1 OBJE\n2 TITL X\n0 TRLR\n", options);
    assert!(output.contains("96 OBJE @O1@\n97 FILE X.\n98 FORM \n99 TYPE photo\n0 TRLR\n"));
}

#[test]
fn object_base_level_beyond_range_is_rejected_up_front() {
    for level in [MAX_OBJECT_BASE_LEVEL + 1, u32::MAX] {
        let mut output = Vec::new();
        let options = TransformOptions::default().with_object_base_level(level);
        let err = transform("1 OBJE\n2 TITL X\n0 TRLR\n".as_bytes(), &mut output, options)
            .unwrap_err();
        assert!(matches!(
            err,
            GedcomError::ObjectLevelOutOfRange { level: found, max: MAX_OBJECT_BASE_LEVEL }
                if found == level
        ));
        assert!(output.is_empty());
    }
}

#[test]
fn date_callback_fires_before_a_later_abort() {
    let mut seen: Vec<DateDiagnostic> = Vec::new();
    let mut output = Vec::new();
    let err = transform_with(
        "0 HEAD\n2 DATE 12.03.1850\n2 DATE Ostern 1900\nbroken\n0 TRLR\n".as_bytes(),
        &mut output,
        TransformOptions::default(),
        |diagnostic| seen.push(diagnostic.clone()),
    )
    .unwrap_err();

    assert!(err.is_malformed_input());
    let lines: Vec<(usize, &str, bool)> = seen
        .iter()
        .map(|d| (d.line_number, d.output.as_str(), d.failed))
        .collect();
    assert_eq!(lines, vec![(2, "12 MAR 1850", false), (3, "OSTERN 1900", false)]);
}

#[test]
fn date_callback_is_silent_in_quiet_mode() {
    let mut calls = 0;
    let mut output = Vec::new();
    transform_with(
        "2 DATE um 1900\n".as_bytes(),
        &mut output,
        TransformOptions::default().with_verbose(false),
        |_| calls += 1,
    )
    .expect("transform");
    assert_eq!(calls, 0);
    assert_eq!(output, b"2 DATE ABT 1900\n");
}

proptest! {
    #[test]
    fn object_ids_are_gapless(count in 1usize..15) {
        let mut input = String::from("0 HEAD\n0 @I1@ INDI\n");
        for index in 0..count {
            input.push_str(&format!("1 OBJE\n2 FORM jpg\n2 TITL Photo {index}\n"));
        }
        input.push_str("1 NOTE end\n0 TRLR\n");

        let (output, report) = run(&input);
        let references: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("2 OBJE "))
            .collect();
        let records: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("0 OBJE "))
            .collect();
        let expected_refs: Vec<String> =
            (1..=count).map(|id| format!("2 OBJE @O{id}@")).collect();
        let expected_records: Vec<String> =
            (1..=count).map(|id| format!("0 OBJE @O{id}@")).collect();

        prop_assert_eq!(references, expected_refs);
        prop_assert_eq!(records, expected_records);
        prop_assert_eq!(report.objects_created, count);
    }
}
