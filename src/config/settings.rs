//! User settings for the finance tracker
//!
//! Manages user preferences: currency symbol, default output files, chart
//! appearance and whether new transactions are saved immediately.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// Chart style preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One slice per category
    #[default]
    Pie,
    /// One vertical bar per category
    Bar,
}

/// Which categories a chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartScope {
    /// Expense categories only
    #[default]
    Expenses,
    /// Every category, income and expense alike
    All,
}

/// User settings for the finance tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default CSV export destination
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    /// Default chart destination
    #[serde(default = "default_chart_file")]
    pub chart_file: PathBuf,

    /// Pie or bar chart
    #[serde(default)]
    pub chart_kind: ChartKind,

    /// Expense categories only, or all of them
    #[serde(default)]
    pub chart_scope: ChartScope,

    /// Chart width in pixels
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,

    /// Chart height in pixels
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,

    /// Save the ledger after every added transaction
    #[serde(default)]
    pub autosave: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_export_file() -> PathBuf {
    PathBuf::from("transactions.csv")
}

fn default_chart_file() -> PathBuf {
    PathBuf::from("expense_breakdown.png")
}

fn default_chart_width() -> u32 {
    800
}

fn default_chart_height() -> u32 {
    480
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            export_file: default_export_file(),
            chart_file: default_chart_file(),
            chart_kind: ChartKind::default(),
            chart_scope: ChartScope::default(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            autosave: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
