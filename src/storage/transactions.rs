//! In-memory transaction store with JSON persistence
//!
//! Transactions are kept in insertion order and never edited. The ledger
//! file is only touched by explicit `load` and `save` calls.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Month, NewTransaction, Transaction, TransactionId};

use super::json_file::JsonFile;

/// Ledger file layout: `{"next_id": .., "transactions": [..]}`
#[derive(Debug, Default, serde::Deserialize)]
struct LedgerData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

#[derive(serde::Serialize)]
struct LedgerRef<'a> {
    next_id: u64,
    transactions: &'a [Transaction],
}

/// Ordered sequence of transactions for the lifetime of the process
#[derive(Debug, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    dirty: bool,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: TransactionId::FIRST,
            dirty: false,
        }
    }

    /// Load the ledger file; a missing file yields an empty store
    pub fn load<P: AsRef<Path>>(path: P) -> FinanceResult<Self> {
        let path = path.as_ref();
        let data: LedgerData = JsonFile::new(path).load()?.unwrap_or_default();

        let mut seen = HashSet::new();
        for txn in &data.transactions {
            if !seen.insert(txn.id) {
                return Err(FinanceError::Storage(format!(
                    "Duplicate transaction id {} in {}",
                    txn.id,
                    path.display()
                )));
            }
            if let Err(e) = txn.to_input().validate() {
                return Err(FinanceError::Storage(format!(
                    "Transaction {} in {}: {}",
                    txn.id,
                    path.display(),
                    e
                )));
            }
        }

        let after_max = data
            .transactions
            .iter()
            .map(|t| t.id.next())
            .max()
            .unwrap_or(TransactionId::FIRST);
        let next_id = after_max.max(TransactionId::new(data.next_id));

        info!(
            path = %path.display(),
            count = data.transactions.len(),
            "loaded ledger"
        );

        Ok(Self {
            transactions: data.transactions,
            next_id,
            dirty: false,
        })
    }

    /// Write the ledger file atomically and clear the unsaved-changes flag
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> FinanceResult<()> {
        let path = path.as_ref();
        JsonFile::new(path).save(&LedgerRef {
            next_id: self.next_id.value(),
            transactions: &self.transactions,
        })?;
        self.dirty = false;

        info!(path = %path.display(), count = self.transactions.len(), "saved ledger");
        Ok(())
    }

    /// Append a transaction, assigning the next id
    ///
    /// Fails with a validation error (leaving the store untouched) for a
    /// negative amount or an empty category.
    pub fn add(&mut self, input: NewTransaction) -> FinanceResult<&Transaction> {
        let input = input.validate()?;

        let id = self.next_id;
        self.next_id = id.next();
        self.dirty = true;

        debug!(id = %id, kind = %input.kind, category = %input.category, "adding transaction");
        self.transactions.push(Transaction::from_input(id, input));

        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Lazy view of the transactions dated within `month`
    ///
    /// The returned iterator is `Clone`; clone it (or call this again) to
    /// walk the month more than once.
    pub fn for_month(&self, month: Month) -> MonthTransactions<'_> {
        MonthTransactions {
            inner: self.transactions.iter(),
            month,
        }
    }

    /// Distinct months that have at least one transaction, ascending
    pub fn months(&self) -> Vec<Month> {
        self.transactions
            .iter()
            .map(Transaction::month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Whether transactions were added since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The id the next added transaction will receive
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }
}

/// Iterator over one month's transactions, see [`TransactionStore::for_month`]
#[derive(Debug, Clone)]
pub struct MonthTransactions<'a> {
    inner: std::slice::Iter<'a, Transaction>,
    month: Month,
}

impl<'a> MonthTransactions<'a> {
    pub fn month(&self) -> Month {
        self.month
    }
}

impl<'a> Iterator for MonthTransactions<'a> {
    type Item = &'a Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.month;
        self.inner.find(|t| month.contains(t.date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
