//! Table output formatting for CLI commands
//!
//! Renders the ranked tag report with comfy-table. Tags judged often enough
//! to be meaningful are emphasized; the rest are dimmed.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::TagReport;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format the tag report
    ///
    /// Rows with `total > min_total` are emphasized. `limit` caps the number
    /// of rows shown.
    pub fn format_report(
        &self,
        report: &TagReport,
        min_total: u64,
        limit: Option<usize>,
    ) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Tag").add_attribute(Attribute::Bold),
            Cell::new("Dislikes").add_attribute(Attribute::Bold),
            Cell::new("Images").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
        ]);

        let rows = limit.unwrap_or(report.entries.len());
        for entry in report.entries.iter().take(rows) {
            let emphasized = entry.total > min_total;
            table.add_row(
                [
                    entry.name.clone(),
                    percent(entry.dislike_ratio),
                    percent(entry.image_share),
                    entry.total.to_string(),
                ]
                .into_iter()
                .enumerate()
                .map(|(column, text)| self.style_cell(text, column, emphasized)),
            );
        }

        table.to_string()
    }

    fn style_cell(&self, text: String, column: usize, emphasized: bool) -> Cell {
        let mut cell = Cell::new(text);
        if column > 0 {
            cell = cell.set_alignment(CellAlignment::Right);
        }
        if !self.use_colors {
            return cell;
        }
        if emphasized {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell.fg(Color::DarkGrey)
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
