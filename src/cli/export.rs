//! CLI command for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_csv, export_full_json, export_full_yaml};

use super::Context;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per transaction)
    Csv,
    /// JSON format (full ledger with metadata)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension; CSV when unknown
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Csv,
        }
    }
}

/// Handle the export command
pub fn handle_export_command(
    ctx: &Context,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> FinanceResult<()> {
    match format {
        ExportFormat::Csv => {
            let count = export_csv(ctx.store.all(), output)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportFormat::Json | ExportFormat::Yaml => {
            let file = File::create(output).map_err(|e| {
                FinanceError::Io(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            if format == ExportFormat::Json {
                export_full_json(&ctx.store, &mut writer, pretty)?;
            } else {
                export_full_yaml(&ctx.store, &mut writer)?;
            }
            writer.flush()?;

            println!("Full ledger exported to: {}", output.display());
        }
    }

    Ok(())
}
