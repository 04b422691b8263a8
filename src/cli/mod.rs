//! CLI command handlers
//!
//! This module contains the implementation of the one-shot subcommands,
//! bridging the clap argument parsing with the store, reports and exporters.

pub mod export;
pub mod report;
pub mod transaction;

pub use export::{handle_export_command, ExportFormat};
pub use report::{handle_chart_command, handle_overview_command, handle_report_command};
pub use transaction::{handle_add_command, handle_import_command, handle_list_command};

use crate::config::{FinancePaths, Settings};
use crate::error::FinanceResult;
use crate::storage::TransactionStore;

/// Paths, settings and the loaded ledger for one command invocation
pub struct Context {
    pub paths: FinancePaths,
    pub settings: Settings,
    pub store: TransactionStore,
}

impl Context {
    /// Create the directories if needed, then load settings and the ledger
    ///
    /// On first run the default settings are written out for editing.
    pub fn load(paths: FinancePaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        if !paths.settings_file().exists() {
            settings.save(&paths)?;
        }
        let store = TransactionStore::load(paths.ledger_file())?;

        Ok(Self {
            paths,
            settings,
            store,
        })
    }

    /// Write the ledger back to its file
    pub fn save(&mut self) -> FinanceResult<()> {
        self.store.save(self.paths.ledger_file())
    }
}
