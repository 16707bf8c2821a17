use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hvf_cli::pipeline::ConvertResult;
use hvf_output::Sink;

/// Print run counts; goes to stderr when the table itself went to stdout.
pub fn print_summary(result: &ConvertResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Records")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("Patients found"),
        Cell::new(result.patient_count),
    ]);
    table.add_row(vec![Cell::new("Valid results"), Cell::new(result.accepted)]);
    table.add_row(vec![
        Cell::new("Rows written"),
        Cell::new(result.rows_written),
    ]);
    table.add_row(vec![
        Cell::new("Incomplete exams"),
        count_cell(result.structural_rejections, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows with other columns"),
        count_cell(result.write_rejections, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Bad records")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(result.rejected(), Color::Red).add_attribute(Attribute::Bold),
    ]);

    let errors = result
        .errors
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let lines = [
        format!("Input: {}", result.input.display()),
        format!("Output: {}", result.output),
        format!("Errors: {errors}"),
        table.to_string(),
    ];
    for line in lines {
        if result.output == Sink::Stdout {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
