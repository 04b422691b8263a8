//! Core data models for the finance tracker
//!
//! Transactions, their ids and amounts, and the calendar month used for
//! reporting.

pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{Month, MonthParseError};
pub use transaction::{
    parse_date, NewTransaction, Transaction, TransactionType, TransactionValidationError,
    MAX_AMOUNT,
};
