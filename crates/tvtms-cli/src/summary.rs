//! Terminal summaries rendered with `comfy-table`.

use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tvtms_model::ActionTier;

use crate::commands::{ApplyReport, ProcessReport};

pub fn print_process_summary(report: &ProcessReport) {
    println!("Source: {}", report.source_id);
    println!("Fingerprint: {}", report.fingerprint);
    match &report.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: none (dry run)"),
    }
    if let Some(path) = &report.diagnostics_file {
        println!("Diagnostics: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Rows seen"),
        Cell::new(report.stats.rows_seen),
    ]);
    table.add_row(vec![
        Cell::new("Rows skipped"),
        Cell::new(report.stats.rows_skipped),
    ]);
    table.add_row(vec![
        Cell::new("Section lines"),
        Cell::new(report.stats.section_lines),
    ]);
    table.add_row(vec![
        Cell::new("Mappings stored"),
        Cell::new(report.store.mappings_stored),
    ]);
    table.add_row(vec![
        Cell::new("Mappings rejected"),
        count_cell(report.stats.mappings_rejected, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Rules stored"),
        Cell::new(report.store.rules_stored),
    ]);
    table.add_row(vec![
        Cell::new("Documentation stored"),
        Cell::new(report.store.documentation_stored),
    ]);
    table.add_row(vec![
        Cell::new("Diagnostics"),
        count_cell(report.stats.diagnostics, Color::Yellow),
    ]);
    println!("{table}");
    print_diagnostic_table(&report.stats.diagnostics_by_kind);
}

pub fn print_apply_summary(report: &ApplyReport) {
    println!("Mappings: {}", report.mappings.display());
    println!("Output: {}", report.output.display());
    if let Some(path) = &report.diagnostics_file {
        println!("Diagnostics: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Mappings seen"),
        Cell::new(report.stats.mappings_seen),
    ]);
    table.add_row(vec![Cell::new("Applied"), Cell::new(report.stats.applied)]);
    table.add_row(vec![Cell::new("Merged"), Cell::new(report.stats.merged)]);
    table.add_row(vec![
        Cell::new("No source (designed absent)"),
        Cell::new(report.stats.no_source),
    ]);
    table.add_row(vec![
        Cell::new("Unresolved"),
        count_cell(report.stats.unresolved, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Ambiguous"),
        count_cell(report.stats.ambiguous, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Pool rows"), Cell::new(report.pool_rows)]);
    table.add_row(vec![
        Cell::new("Unconsumed rows"),
        Cell::new(report.remaining),
    ]);
    table.add_row(vec![
        Cell::new("Standardized rows"),
        Cell::new(report.standardized_rows),
    ]);
    println!("{table}");
    print_tier_table(&report.stats.applied_by_tier);
}

fn print_diagnostic_table(by_kind: &BTreeMap<String, usize>) {
    if by_kind.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Diagnostic"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (kind, count) in by_kind {
        table.add_row(vec![Cell::new(kind), count_cell(*count, Color::Yellow)]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

fn print_tier_table(by_tier: &BTreeMap<String, usize>) {
    if by_tier.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Tier"), header_cell("Applied")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    // Priority order, not alphabetical.
    for tier in ActionTier::IN_PRIORITY_ORDER {
        if let Some(count) = by_tier.get(tier.as_str()) {
            table.add_row(vec![Cell::new(tier.as_str()), Cell::new(*count)]);
        }
    }
    println!();
    println!("Applied by tier:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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
