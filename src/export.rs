//! Rendering relations as CSV, JSON, or a terminal table.
//!
//! Columns always follow the relation's canonical attribute order, the
//! order of its first tuple.

use crate::relation::{Relation, Tuple};

/// Message shown for a relation without tuples
pub const EMPTY_RELATION: &str = "empty relation (0 tuples)";

fn cells(tuple: &Tuple, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| tuple.get(column).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

// header names are only quoted when they need it
fn csv_header(column: &str) -> String {
    if column.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        csv_quote(column)
    } else {
        column.to_string()
    }
}

/// CSV with a header line; every cell is quoted and embedded quotes doubled.
/// An empty relation exports as an empty string.
pub fn to_csv(relation: &Relation) -> String {
    let Some(columns) = relation.schema() else {
        return String::new();
    };

    let header: Vec<String> = columns.iter().map(|c| csv_header(c)).collect();
    let mut csv = header.join(",");
    csv.push('\n');
    for tuple in relation {
        let line: Vec<String> = cells(tuple, &columns)
            .iter()
            .map(|cell| csv_quote(cell))
            .collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }
    csv
}

/// Pretty-printed JSON array of objects
pub fn to_json(relation: &Relation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(relation)
}

/// Plain-text table with a header, a separator and a tuple count
pub fn render_table(relation: &Relation) -> String {
    let Some(columns) = relation.schema() else {
        return EMPTY_RELATION.to_string();
    };

    let rows: Vec<Vec<String>> = relation.iter().map(|t| cells(t, &columns)).collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| -> String {
        let padded: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let padding = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(padding))
            })
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut table = String::new();
    table.push_str(&format_row(&columns[..]));
    table.push('\n');
    table.push_str(&format!("|-{}-|", separator.join("-|-")));
    table.push('\n');
    for row in &rows {
        table.push_str(&format_row(&row[..]));
        table.push('\n');
    }
    table.push_str(&format!("({} tuple{})", rows.len(), if rows.len() == 1 { "" } else { "s" }));
    table
}
