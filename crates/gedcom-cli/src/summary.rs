use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gedcom_core::ConvertOutcome;
use gedcom_model::DateDiagnostic;

/// Echo a date diagnostic as `Line <n>:<tag> <before> <after> <failed>`.
pub fn print_diagnostic(diagnostic: &DateDiagnostic) {
    println!(
        "Line {}:{} {} {} {}",
        diagnostic.line_number,
        diagnostic.tag,
        diagnostic.input,
        diagnostic.output,
        diagnostic.failed
    );
}

pub fn print_summary(outcome: &ConvertOutcome) {
    let report = &outcome.report;
    println!("Input: {}", outcome.input.display());
    println!("Output: {}", outcome.output.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Lines read"), Cell::new(report.lines_read)]);
    table.add_row(vec![
        Cell::new("Lines written"),
        Cell::new(report.lines_written),
    ]);
    table.add_row(vec![
        Cell::new("Lines suppressed"),
        dim_or_value(report.lines_suppressed),
    ]);
    table.add_row(vec![
        Cell::new("Dates normalized"),
        Cell::new(report.dates_normalized),
    ]);
    table.add_row(vec![
        Cell::new("Dates kept (unparsed)"),
        count_cell(report.dates_failed, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Objects created"),
        dim_or_value(report.objects_created),
    ]);
    println!("{table}");

    if !report.trailer_seen {
        eprintln!("warning: input has no TRLR record");
    }
    if report.has_date_failures() {
        print_failed_dates(&report.diagnostics);
    }
}

fn print_failed_dates(diagnostics: &[DateDiagnostic]) {
    let failed: Vec<&DateDiagnostic> = diagnostics.iter().filter(|d| d.failed).collect();
    if failed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Line"), header_cell("Value kept")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for diagnostic in failed {
        table.add_row(vec![
            Cell::new(diagnostic.line_number),
            Cell::new(&diagnostic.input).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Unparsed dates:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_or_value(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
