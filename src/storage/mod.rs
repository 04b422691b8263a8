//! Storage layer for the finance tracker
//!
//! Holds the in-memory transaction store and the JSON file helpers used to
//! persist it.

pub mod json_file;
pub mod transactions;

pub use json_file::JsonFile;
pub use transactions::{MonthTransactions, TransactionStore};
