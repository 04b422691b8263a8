//! Custom error types for the finance tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{MoneyParseError, MonthParseError, TransactionValidationError};

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Bad transaction input (negative amount, empty category, unparsable field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Nothing to chart, or the chart could not be drawn
    #[error("Render error: {0}")]
    Render(String),

    /// File read/write failures
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger file errors (unreadable or malformed data)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization failures while exporting
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a render error
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::Io(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

impl From<TransactionValidationError> for FinanceError {
    fn from(err: TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<MoneyParseError> for FinanceError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<MonthParseError> for FinanceError {
    fn from(err: MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;
