//! JSON Export functionality
//!
//! Exports the complete ledger to JSON format with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction};
use crate::storage::TransactionStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,

    /// Date of the earliest transaction
    pub earliest_transaction: Option<String>,

    /// Date of the latest transaction
    pub latest_transaction: Option<String>,

    pub total_income: Money,

    pub total_expense: Money,
}

impl FullExport {
    /// Snapshot the store
    pub fn from_store(store: &TransactionStore) -> Self {
        let transactions = store.all().to_vec();

        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let total_income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expense = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction,
            latest_transaction,
            total_income,
            total_expense,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Transaction count mismatch: metadata says {}, found {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }

        Ok(())
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    store: &TransactionStore,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    let export = FullExport::from_store(store);

    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    result.map_err(|e| FinanceError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

/// Parse a JSON export back, checking its schema version
pub fn import_from_json(json_str: &str) -> FinanceResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FinanceError::Validation(e.to_string()))?;

    export.validate().map_err(FinanceError::Validation)?;

    Ok(export)
}
