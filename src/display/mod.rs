//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions and report pieces for
//! terminal display.

pub mod report;
pub mod transaction;

pub use report::format_chart_legend;
pub use transaction::{format_transaction_list, format_transaction_short};
