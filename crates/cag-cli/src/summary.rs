use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cag_model::{DerivedRecord, PciValue};
use cag_report::{BatchStatistics, cell_text};

use cag_cli::types::{AnalysisResult, ConversionResult};

const PREVIEW_COLUMNS: [&str; 10] = [
    "patient_number",
    "date_of_angiography",
    "cag",
    "segment_code",
    "vessel_disease",
    "anatomical_dx_json",
    "lesion_total_num",
    "lesion_B2/C_num",
    "pci",
    "complex_pci",
];

pub fn print_analysis(result: &AnalysisResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    print_preview(&result.records, result.report.preview_rows);
    print_statistics(&result.statistics);
    let fallbacks: Vec<&DerivedRecord> = result
        .records
        .iter()
        .filter(|r| !r.diagnostics.is_empty())
        .collect();
    if !fallbacks.is_empty() {
        eprintln!("Review payloads replaced with an empty object:");
        for record in fallbacks {
            eprintln!("- {}: {}", record.patient_number, record.diagnostics.join("; "));
        }
    }
}

pub fn print_conversion(result: &ConversionResult) {
    println!(
        "Converted {} records: {} -> {}",
        result.records,
        result.input.display(),
        result.output.display()
    );
}

fn print_preview(records: &[DerivedRecord], rows: usize) {
    if rows == 0 || records.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(PREVIEW_COLUMNS.into_iter().map(header_cell));
    apply_preview_table_style(&mut table);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for record in records.iter().take(rows) {
        let mut row = Vec::with_capacity(PREVIEW_COLUMNS.len());
        for column in PREVIEW_COLUMNS {
            row.push(match column {
                "complex_pci" => pci_cell(record.complexity.complex_pci),
                "cag" => flag_cell(record.cag),
                "pci" => flag_cell(record.pci),
                _ => Cell::new(cell_text(record, column)),
            });
        }
        table.add_row(row);
    }
    println!("{table}");
    if records.len() > rows {
        println!("... {} more rows", records.len() - rows);
    }
}

fn print_statistics(stats: &BatchStatistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_statistics_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Encounters"), Cell::new(stats.encounters)]);
    table.add_row(vec![Cell::new("With angiography"), Cell::new(stats.cag_encounters)]);
    table.add_row(vec![Cell::new("With PCI"), Cell::new(stats.pci_encounters)]);
    table.add_row(vec![
        Cell::new("Complex PCI"),
        count_cell(stats.complex_pci_encounters, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Review fallbacks"),
        count_cell(stats.fallback_encounters, Color::Red),
    ]);
    table.add_row(vec![Cell::new("Significant lesions"), Cell::new(stats.lesions)]);
    table.add_row(vec![Cell::new("B2/C lesions"), Cell::new(stats.complex_lesions)]);
    if stats.complex_lesion_percentage().is_some() {
        table.add_row(vec![
            Cell::new("B2/C lesion share")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(stats.complex_lesion_percentage_text()).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

fn apply_preview_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn apply_statistics_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn pci_cell(value: PciValue) -> Cell {
    match value {
        PciValue::NotApplicable => dim_cell(value),
        PciValue::Flag(true) => Cell::new(value)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        PciValue::Flag(false) => Cell::new(value),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
