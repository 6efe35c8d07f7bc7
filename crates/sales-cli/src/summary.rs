//! Terminal rendering for merge results and column profiles.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sales_model::{ColumnKind, ColumnSummary, FrameProfile};

use crate::types::MergeOutcome;

/// Longest distinct-value list shown in a table cell before truncating.
const MAX_LISTED_CHARS: usize = 60;

pub fn print_merge_summary(outcome: &MergeOutcome) {
    println!(
        "Merged {} rows x {} columns -> {}",
        outcome.rows,
        outcome.columns,
        outcome.output.display()
    );
}

/// Builds the profile table: one row per column, statistics dimmed when absent.
pub fn profile_table(profile: &FrameProfile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
        header_cell("Unique"),
        header_cell("Values"),
        header_cell("Nulls"),
        header_cell("Null %"),
    ]);
    apply_profile_table_style(&mut table);
    for index in [2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13] {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for summary in &profile.columns {
        let stats = summary.numeric();
        let stat = |pick: fn(&sales_model::NumericStats) -> Option<f64>| {
            stat_cell(stats.and_then(pick))
        };
        table.add_row(vec![
            Cell::new(&summary.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            kind_cell(summary),
            Cell::new(summary.count),
            stat(|s| s.mean),
            stat(|s| s.std),
            stat(|s| s.min),
            stat(|s| s.q25),
            stat(|s| s.median),
            stat(|s| s.q75),
            stat(|s| s.max),
            Cell::new(summary.nunique),
            values_cell(&summary.unique_values),
            null_count_cell(summary.num_null_values),
            null_percent_cell(summary.null_perct),
        ]);
    }
    table
}

/// Formats a statistic without trailing zeros, at most 4 decimals.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let formatted = format!("{value:.4}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn apply_profile_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn kind_cell(summary: &ColumnSummary) -> Cell {
    let cell = Cell::new(&summary.dtype);
    match summary.kind {
        ColumnKind::Numeric(_) => cell.fg(Color::Green),
        ColumnKind::Temporal => cell.fg(Color::Magenta),
        ColumnKind::Text => cell,
        ColumnKind::Other => cell.fg(Color::DarkGrey),
    }
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_stat(value)),
        None => dim_cell("-"),
    }
}

fn values_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        return dim_cell("-");
    }
    let joined = values.join(", ");
    if joined.chars().count() <= MAX_LISTED_CHARS {
        Cell::new(joined)
    } else {
        let truncated: String = joined.chars().take(MAX_LISTED_CHARS).collect();
        Cell::new(format!("{truncated}…"))
    }
}

fn null_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn null_percent_cell(percent: f64) -> Cell {
    let text = format!("{percent:.2}");
    if percent >= 50.0 {
        Cell::new(text).fg(Color::Red)
    } else if percent > 0.0 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        dim_cell(text)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
