//! Plain-text rendering of monthly reports

use crate::display::report::{double_separator, format_bar, format_percentage, separator, truncate};

use super::monthly::MonthlyReport;

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Render a report using the default `$` symbol
pub fn render_text(report: &MonthlyReport) -> String {
    render_text_with_symbol(report, "$")
}

/// Render a report with totals and a per-category breakdown
pub fn render_text_with_symbol(report: &MonthlyReport, symbol: &str) -> String {
    let mut output = String::new();

    let title = match report.month {
        Some(month) => format!("Monthly Report: {}", month),
        None => "Report".to_string(),
    };
    output.push_str(&title);
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    output.push_str(&format!(
        "{:<16}{:>14}\n",
        "Total Income:",
        report.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16}{:>14}\n",
        "Total Expenses:",
        report.total_expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16}{:>14}\n",
        "Net Balance:",
        report.net_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16}{:>14}\n",
        "Transactions:", report.transaction_count
    ));

    let rows = report.sorted_breakdown();
    if rows.is_empty() {
        output.push_str("\nNo transactions recorded.\n");
        return output;
    }

    let total = report.breakdown_total().as_f64();
    let largest = rows.first().map(|(_, amount)| amount.as_f64()).unwrap_or(0.0);

    output.push('\n');
    output.push_str(&format!(
        "{:<22} {:>14} {:>7}  {}\n",
        "Category", "Amount", "Share", ""
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for (category, amount) in rows {
        let share = if total > 0.0 {
            amount.as_f64() / total * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<22} {:>14} {:>7}  {}\n",
            truncate(category, 22),
            amount.format_with_symbol(symbol),
            format_percentage(share),
            format_bar(amount.as_f64(), largest, BAR_WIDTH)
        ));
    }

    output
}

/// Render the all-months summary: income, expenses and balance per month
pub fn render_overview(reports: &[MonthlyReport], symbol: &str) -> String {
    if reports.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:>14} {:>14} {:>14}\n",
        "Month", "Income", "Expenses", "Balance"
    ));
    output.push_str(&separator(55));
    output.push('\n');

    for report in reports {
        let month = report
            .month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            month,
            report.total_income.format_with_symbol(symbol),
            report.total_expense.format_with_symbol(symbol),
            report.net_balance.format_with_symbol(symbol)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, NewTransaction};
    use crate::reports::monthly::{monthly_overview, summarize, summarize_month};
    use crate::storage::TransactionStore;
    use chrono::NaiveDate;

    fn store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::income(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "Salary",
                Money::from_units(1000),
            ))
            .unwrap();
        store
            .add(NewTransaction::expense(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Groceries",
                Money::from_units(200),
            ))
            .unwrap();
        store
    }

    #[test]
    fn test_render_text_contains_totals_and_categories() {
        let report = summarize_month(&store(), Month::new(2024, 1).unwrap());
        let text = render_text(&report);

        assert!(text.starts_with("Monthly Report: 2024-01"));
        assert!(text.contains("$1000.00"));
        assert!(text.contains("$200.00"));
        assert!(text.contains("$800.00"));
        assert!(text.contains("Salary"));
        assert!(text.contains("Groceries"));

        let salary_line = text.lines().position(|l| l.starts_with("Salary")).unwrap();
        let groceries_line = text.lines().position(|l| l.starts_with("Groceries")).unwrap();
        assert!(salary_line < groceries_line);
    }

    #[test]
    fn test_render_text_empty_report() {
        let report = summarize(std::iter::empty::<&crate::models::Transaction>());
        let text = render_text(&report);
        assert!(text.starts_with("Report"));
        assert!(text.contains("No transactions recorded."));
    }

    #[test]
    fn test_render_with_symbol() {
        let report = summarize(store().all());
        let text = render_text_with_symbol(&report, "€");
        assert!(text.contains("€800.00"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_render_overview() {
        let text = render_overview(&monthly_overview(&store()), "$");
        assert!(text.contains("2024-01"));
        assert!(text.contains("$800.00"));
        assert_eq!(render_overview(&[], "$"), "No transactions recorded.\n");
    }
}
