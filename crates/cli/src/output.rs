//! Output formatting utilities

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use monitor_lib::{TabInfo, Trend};
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Pretty-print any view as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print rows as a rounded table, or `empty` when there are none
pub fn print_rows<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        print_warning(empty);
        return;
    }
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Print a section heading with an underline
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(50));
}

/// Print a tab strip, highlighting the active tab
pub fn print_tabs(tabs: &[TabInfo]) {
    let strip: Vec<String> = tabs
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label).cyan().bold().to_string()
            } else {
                t.label.dimmed().to_string()
            }
        })
        .collect();
    println!("{}\n", strip.join("  "));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Ten-cell usage bar with the percentage, e.g. `██████░░░░ 62%`
pub fn usage_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = (usize::from(percent) + 5) / 10;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
    let colored = match percent {
        0..=69 => bar.green(),
        70..=84 => bar.yellow(),
        _ => bar.red(),
    };
    format!("{} {}%", colored, percent)
}

/// Change indicator of a stat card
pub fn format_change(change: &str, trend: Trend) -> String {
    match trend {
        Trend::Up => format!("↑ {}", change).green().to_string(),
        Trend::Down => format!("↓ {}", change).red().to_string(),
        Trend::Stable => format!("→ {}", change).dimmed().to_string(),
    }
}

/// Color a status or severity label
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" | "success" | "acknowledged" => status.green().to_string(),
        "running" | "scheduled" | "pending" => status.blue().to_string(),
        "warning" | "degraded" => status.yellow().to_string(),
        "critical" | "failed" | "unhealthy" => status.red().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_usage_bar() {
        plain();
        assert_eq!(usage_bar(0), "░░░░░░░░░░ 0%");
        assert_eq!(usage_bar(62), "██████░░░░ 62%");
        assert_eq!(usage_bar(100), "██████████ 100%");
        assert_eq!(usage_bar(180), "██████████ 100%");
    }

    #[test]
    fn test_format_change() {
        plain();
        assert_eq!(format_change("+2 this week", Trend::Up), "↑ +2 this week");
        assert_eq!(format_change("-0.3%", Trend::Down), "↓ -0.3%");
    }

    #[test]
    fn test_color_status_keeps_text() {
        plain();
        assert_eq!(color_status("Healthy"), "Healthy");
        assert_eq!(color_status("Failed"), "Failed");
        assert_eq!(color_status("Unknown"), "Unknown");
    }
}
