use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vpl_cli::session::ReplayReport;
use vpl_model::ButtonIR;

pub fn print_summary(report: &ReplayReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Event"),
        header_cell("Action"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);

    for slot in &report.program {
        let status = if slot.is_complete() {
            Cell::new("complete").fg(Color::Green)
        } else if slot.is_empty() {
            Cell::new("empty").fg(Color::DarkGrey)
        } else {
            Cell::new("partial").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(slot.row).set_alignment(CellAlignment::Right),
            Cell::new(describe(slot.event.as_ref())),
            Cell::new(describe(slot.action.as_ref())),
            status,
        ]);
    }
    println!("{table}");
    println!("Slot updates: {}", report.notices);

    if report.has_failures() {
        let mut failures = Table::new();
        failures.set_header(vec![
            header_cell("Step"),
            header_cell("Op"),
            header_cell("Error"),
        ]);
        apply_table_style(&mut failures);
        for failed in &report.failed_steps {
            failures.add_row(vec![
                Cell::new(failed.index).set_alignment(CellAlignment::Right),
                Cell::new(failed.op),
                Cell::new(&failed.error).fg(Color::Red),
            ]);
        }
        println!("{failures}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

/// "prox [0 1 0 0 2 0 0] mem=9" style one-liner.
fn describe(button: Option<&ButtonIR>) -> String {
    let Some(ir) = button else {
        return "-".to_string();
    };
    let mut text = ir.basename.clone();
    if !ir.clicked.is_empty() {
        let values: Vec<String> = ir.clicked.iter().map(u8::to_string).collect();
        text.push_str(&format!(" [{}]", values.join(" ")));
    }
    if ir.uses_memory() {
        text.push_str(&format!(" mem={}", ir.memory_state));
    }
    text
}
