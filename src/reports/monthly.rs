//! Monthly report aggregation
//!
//! Reduces a sequence of transactions into income/expense totals and a
//! per-category breakdown.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Money, Month, Transaction, TransactionType};
use crate::storage::TransactionStore;

/// Aggregated totals for a set of transactions, usually one calendar month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyReport {
    /// The month the report covers, when produced for a specific month
    pub month: Option<Month>,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus expenses
    pub net_balance: Money,
    /// Summed amount per category (income and expense categories alike)
    pub breakdown: HashMap<String, Money>,
    /// Summed amount per category, expenses only
    pub expense_breakdown: HashMap<String, Money>,
    pub transaction_count: usize,
}

impl MonthlyReport {
    /// Categories with a nonzero total, largest first (ties by name)
    pub fn sorted_breakdown(&self) -> Vec<(&str, Money)> {
        sorted_nonzero(&self.breakdown)
    }

    /// Expense categories with a nonzero total, ordered like [`Self::sorted_breakdown`]
    pub fn sorted_expense_breakdown(&self) -> Vec<(&str, Money)> {
        sorted_nonzero(&self.expense_breakdown)
    }

    /// Sum of every category amount
    pub fn breakdown_total(&self) -> Money {
        self.breakdown.values().copied().sum()
    }
}

fn sorted_nonzero(breakdown: &HashMap<String, Money>) -> Vec<(&str, Money)> {
    let mut rows: Vec<(&str, Money)> = breakdown
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

/// Reduce transactions into a report; an empty input yields an all-zero report
pub fn summarize<'a, I>(transactions: I) -> MonthlyReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut report = MonthlyReport::default();

    for txn in transactions {
        match txn.kind {
            TransactionType::Income => report.total_income += txn.amount,
            TransactionType::Expense => {
                report.total_expense += txn.amount;
                *report
                    .expense_breakdown
                    .entry(txn.category.clone())
                    .or_insert_with(Money::zero) += txn.amount;
            }
        }
        *report
            .breakdown
            .entry(txn.category.clone())
            .or_insert_with(Money::zero) += txn.amount;
        report.transaction_count += 1;
    }

    report.net_balance = report.total_income - report.total_expense;
    report
}

/// Report for one month of the store
pub fn summarize_month(store: &TransactionStore, month: Month) -> MonthlyReport {
    MonthlyReport {
        month: Some(month),
        ..summarize(store.for_month(month))
    }
}

/// One report per month present in the store, ascending by month
pub fn monthly_overview(store: &TransactionStore) -> Vec<MonthlyReport> {
    let mut by_month: BTreeMap<Month, Vec<&Transaction>> = BTreeMap::new();
    for txn in store.all() {
        by_month.entry(txn.month()).or_default().push(txn);
    }

    by_month
        .into_iter()
        .map(|(month, transactions)| MonthlyReport {
            month: Some(month),
            ..summarize(transactions)
        })
        .collect()
}
