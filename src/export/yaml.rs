//! YAML Export functionality
//!
//! Exports the complete ledger to YAML format for human-readable backup.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::export::json::FullExport;
use crate::storage::TransactionStore;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(store: &TransactionStore, writer: &mut W) -> FinanceResult<()> {
    let export = FullExport::from_store(store);
    let err = |e: std::io::Error| FinanceError::Export(e.to_string());

    writeln!(writer, "# Finance Tracker Ledger Export").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FinanceResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FinanceError::Validation(e.to_string()))?;

    export.validate().map_err(FinanceError::Validation)?;

    Ok(export)
}
