use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvdoc_model::ReportWarning;

use crate::commands::CheckResult;

pub fn print_check_summary(result: &CheckResult) {
    println!("Data: {}", result.data.display());
    match &result.template {
        Some(path) => println!("Template: {}", path.display()),
        None => println!("Template: (default)"),
    }
    println!(
        "Properties: {}  Records: {}",
        result.properties, result.records
    );
    if result.warnings.is_empty() {
        println!("No warnings.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Kind"),
        header_cell("Property"),
        header_cell("Value"),
    ]);
    apply_warning_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, warning) in result.warnings.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            kind_cell(warning),
            Cell::new(warning.property()),
            value_cell(warning),
        ]);
    }
    println!("{table}");
    println!("Warnings: {}", result.warnings.len());
}

fn apply_warning_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(warning: &ReportWarning) -> Cell {
    match warning {
        ReportWarning::UnreferencedProperty { .. } => {
            Cell::new("unreferenced").fg(Color::Yellow)
        }
        ReportWarning::MissingEnumerationEntry { .. } => Cell::new("no enumeration entry")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn value_cell(warning: &ReportWarning) -> Cell {
    match warning {
        ReportWarning::MissingEnumerationEntry { value, .. } => Cell::new(value),
        ReportWarning::UnreferencedProperty { .. } => dim_cell("-"),
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
