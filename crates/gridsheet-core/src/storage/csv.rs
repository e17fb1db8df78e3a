//! CSV import/export.
//!
//! Import produces a rectangular `[[String]]`: ragged rows are
//! normalized to the widest row with empty cells. Export trims the grid
//! to its last non-empty row/column and emits numeric-looking values
//! bare so downstream tools read them as numbers.

use gridsheet_engine::engine::{CellAddr, Grid, looks_numeric};

/// Parse CSV text into rows of fields, handling quoted fields and
/// escaped quotes. Ragged rows are padded to the widest row.
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = content.lines().map(parse_csv_line).collect();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

/// Parse a single CSV line, handling quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

/// Serialize the grid trimmed to its last non-empty row/column.
pub fn write_csv(grid: &Grid) -> String {
    let (rows, cols) = grid.trimmed_extents();
    let mut out = String::new();
    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                out.push(',');
            }
            let raw = grid.get(CellAddr::new(row, col)).unwrap_or("");
            push_csv_field(&mut out, raw);
        }
        out.push('\n');
    }
    out
}

fn push_csv_field(out: &mut String, value: &str) {
    if looks_numeric(value) {
        // Exported as a numeric value, never quoted.
        out.push_str(value);
    } else if value.contains([',', '"', '\n']) {
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(value);
    }
}
