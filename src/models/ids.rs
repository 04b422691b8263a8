//! Strongly-typed transaction ID
//!
//! Ids are sequential integers handed out by the store; the newtype keeps
//! them from being mixed up with counts or amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// The id given to the first transaction of an empty ledger
    pub const FIRST: TransactionId = TransactionId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_monotonic() {
        let id = TransactionId::FIRST;
        assert!(id.next() > id);
        assert_eq!(id.next().value(), 2);
    }

    #[test]
    fn test_display_and_parse() {
        let id = TransactionId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42".parse::<TransactionId>().unwrap(), id);
        assert!("txn-42".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&TransactionId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
