//! Finance Tracker - terminal personal finance tracking
//!
//! Records income and expense transactions, summarises them per month,
//! renders text reports and PNG charts of the category breakdown, and
//! exports the ledger to CSV, JSON or YAML.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, months)
//! - `storage`: In-memory transaction store with JSON persistence
//! - `reports`: Monthly aggregation, text reports and charts
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting helpers
//! - `shell`: Interactive menu loop
//! - `cli`: Handlers for the one-shot subcommands
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{FinancePaths, Settings};
//! use finance_tracker::storage::TransactionStore;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = TransactionStore::load(paths.ledger_file())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod shell;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
