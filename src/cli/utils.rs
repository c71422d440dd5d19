//! Shared utilities for CLI commands

use chrono::NaiveDate;
use tabled::{Table, settings::Style};

use crate::export::PRINT_DATE_FORMAT;

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Completion glyph shown in task listings
pub fn done_glyph(done: bool) -> &'static str {
    if done { "✓" } else { " " }
}

/// Deadline as shown to the user
pub fn format_deadline(deadline: NaiveDate) -> String {
    deadline.format(PRINT_DATE_FORMAT).to_string()
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
