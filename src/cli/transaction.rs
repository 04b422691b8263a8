//! CLI commands for recording, listing and importing transactions

use std::path::Path;

use chrono::Local;

use crate::display::{format_transaction_list, format_transaction_short};
use crate::error::{FinanceError, FinanceResult};
use crate::export::{import_from_json, import_from_yaml, read_csv_file};
use crate::models::{parse_date, Money, Month, NewTransaction, TransactionType};

use super::{Context, ExportFormat};

/// Record one transaction and save the ledger
pub fn handle_add_command(
    ctx: &mut Context,
    kind: TransactionType,
    amount: &str,
    category: &str,
    date: Option<&str>,
    note: Option<String>,
) -> FinanceResult<()> {
    let today = Local::now().date_naive();
    let date = match date {
        Some(d) => parse_date(d, today)?,
        None => today,
    };
    let amount = Money::parse(amount)?;

    let mut input = NewTransaction::new(date, kind, category, amount);
    input.note = note;

    let line = {
        let added = ctx.store.add(input)?;
        format_transaction_short(added, &ctx.settings.currency_symbol)
    };
    ctx.save()?;

    println!("Added {}", line);
    Ok(())
}

/// Print the register, optionally for one month
pub fn handle_list_command(ctx: &Context, month: Option<Month>) -> FinanceResult<()> {
    let symbol = &ctx.settings.currency_symbol;
    let table = match month {
        Some(month) => format_transaction_list(ctx.store.for_month(month), symbol),
        None => format_transaction_list(ctx.store.all(), symbol),
    };

    print!("{}", table);
    Ok(())
}

/// Append the transactions of an export file, giving them fresh ids
///
/// The format comes from `format`, else from the file extension (`json`,
/// `yaml`/`yml`, anything else is CSV). The whole file is parsed before
/// anything is added, so a bad row leaves the ledger unchanged.
pub fn handle_import_command(
    ctx: &mut Context,
    file: &Path,
    format: Option<ExportFormat>,
) -> FinanceResult<()> {
    if !file.exists() {
        return Err(FinanceError::Io(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let format = format.unwrap_or_else(|| ExportFormat::from_path(file));
    let parsed = match format {
        ExportFormat::Csv => read_csv_file(file)?,
        ExportFormat::Json => import_from_json(&read_file(file)?)?.transactions,
        ExportFormat::Yaml => import_from_yaml(&read_file(file)?)?.transactions,
    };

    if parsed.is_empty() {
        println!("No transactions found in {}.", file.display());
        return Ok(());
    }

    let inputs = parsed
        .iter()
        .map(|txn| txn.to_input().validate())
        .collect::<Result<Vec<_>, _>>()?;
    for input in inputs {
        ctx.store.add(input)?;
    }
    ctx.save()?;

    println!(
        "Imported {} transactions from {}",
        parsed.len(),
        file.display()
    );
    Ok(())
}

fn read_file(path: &Path) -> FinanceResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", path.display(), e)))
}
