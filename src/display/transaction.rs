//! Transaction display formatting
//!
//! Formats the ledger as a register table for terminal output.

use crate::display::report::truncate;
use crate::models::Transaction;

const CATEGORY_MAX: usize = 24;
const NOTE_MAX: usize = 30;

/// Format a list of transactions as a register table
pub fn format_transaction_list<'a, I>(transactions: I, currency_symbol: &str) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let rows: Vec<[String; 6]> = transactions
        .into_iter()
        .map(|txn| {
            [
                txn.id.to_string(),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.kind.to_string(),
                truncate(&txn.category, CATEGORY_MAX),
                txn.signed_amount().format_with_symbol(currency_symbol),
                txn.note
                    .as_deref()
                    .map(|n| truncate(n, NOTE_MAX))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    if rows.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let headers = ["ID", "Date", "Type", "Category", "Amount", "Note"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &headers.map(String::from), &widths);

    // Separator line
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(rule.join("  ").trim_end());
    output.push('\n');

    for row in &rows {
        push_row(&mut output, row, &widths);
    }

    output
}

fn push_row(output: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = format!(
        "{:>w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {:>w4$}  {}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        cells[4],
        cells[5],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    );
    output.push_str(line.trim_end());
    output.push('\n');
}

/// One-line summary of a single transaction, used as add confirmation
pub fn format_transaction_short(txn: &Transaction, currency_symbol: &str) -> String {
    format!(
        "#{} {} {} {} {}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        txn.kind,
        txn.category,
        txn.amount.format_with_symbol(currency_symbol)
    )
}
