//! Report formatting utilities for terminal output

use crate::reports::ChartLegend;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Describe a rendered chart: where it went and which colour is which category
pub fn format_chart_legend(legend: &ChartLegend, symbol: &str) -> String {
    let mut output = format!("Chart saved to {}\n", legend.path.display());
    for entry in &legend.entries {
        output.push_str(&format!(
            "  {:<8} {:<22} {:>14} {:>7}\n",
            entry.color,
            truncate(&entry.category, 22),
            entry.amount.format_with_symbol(symbol),
            format_percentage(entry.percentage)
        ));
    }
    output
}
