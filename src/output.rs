//! Rendering of result tables.
//!
//! - **JSON** via [`to_json()`] / [`to_json_pretty()`] - the host-facing shape
//!   (`columns`, `rows`, `rowCount`, `executionTimeMs`, `success`, `error`)
//! - **Text** via [`to_text()`] - an aligned grid for terminals
//!
//! # Examples
//!
//! ```
//! use mcpql::Table;
//! use mcpql::output::to_text;
//!
//! let table = Table::new(
//!     vec!["id".into(), "title".into()],
//!     vec![vec!["1".into(), "Fix lexer".into()]],
//! );
//!
//! assert_eq!(to_text(&table), "id | title    \n---+----------\n1  | Fix lexer\n(1 row)\n");
//! ```

use crate::table::Table;

pub struct TablePrinter {
    max_width: usize,
}

impl Default for TablePrinter {
    fn default() -> Self {
        TablePrinter { max_width: 60 }
    }
}

impl TablePrinter {
    /// Cells longer than `max_width` characters are cut with `...`.
    pub fn new(max_width: usize) -> Self {
        TablePrinter {
            max_width: max_width.max(4),
        }
    }

    pub fn print(&self, table: &Table) -> String {
        if !table.success {
            return format!(
                "error: {}\n",
                table.error.as_deref().unwrap_or("unknown error")
            );
        }

        let header: Vec<String> = table.columns.iter().map(|c| self.clip(c)).collect();
        let body: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| row.iter().map(|c| self.clip(c)).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut result = String::new();
        if !header.is_empty() {
            result.push_str(&self.line(&header, &widths));
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            result.push_str(&rule.join("-+-"));
            result.push('\n');
            for row in &body {
                result.push_str(&self.line(row, &widths));
            }
        }

        let noun = if table.row_count == 1 { "row" } else { "rows" };
        result.push_str(&format!("({} {})\n", table.row_count, noun));
        result
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{:<width$}", cell, width = w)
            })
            .collect();
        let mut line = padded.join(" | ");
        line.push('\n');
        line
    }

    fn clip(&self, cell: &str) -> String {
        let cell = cell.replace(['\n', '\r', '\t'], " ");
        if cell.chars().count() <= self.max_width {
            cell
        } else {
            let mut clipped: String = cell.chars().take(self.max_width - 3).collect();
            clipped.push_str("...");
            clipped
        }
    }
}

/// Converts a table to compact JSON.
pub fn to_json(table: &Table) -> Result<String, serde_json::Error> {
    serde_json::to_string(table)
}

/// Converts a table to JSON with 2-space indentation.
pub fn to_json_pretty(table: &Table) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

/// Renders a table as an aligned text grid followed by its row count.
pub fn to_text(table: &Table) -> String {
    TablePrinter::default().print(table)
}
