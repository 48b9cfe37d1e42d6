use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bbfacts_cli::pipeline::{CheckResult, GenerateResult};

pub fn print_generate_summary(result: &GenerateResult) {
    println!("Input: {}", result.input_csv.display());
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Company"),
        header_cell("Plan"),
        header_cell("Monthly Price"),
        header_cell("File"),
        header_cell("Height"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for label in &result.labels {
        table.add_row(vec![
            Cell::new(label.row),
            Cell::new(&label.company_name),
            Cell::new(&label.plan_name),
            Cell::new(format!("${}", label.monthly_price)).add_attribute(Attribute::Bold),
            optional_cell(label.file.as_deref()),
            optional_cell(label.height),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} labels", result.labels.len())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    if let Some(path) = &result.archive {
        println!("Archive: {}", path.display());
    }
}

pub fn print_check_summary(result: &CheckResult) {
    println!(
        "{}: {} rows, {} columns, no errors",
        result.input_csv.display(),
        result.rows_checked,
        result.columns
    );
}

fn apply_summary_table_style(table: &mut Table) {
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

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
