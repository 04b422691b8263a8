//! Transaction model
//!
//! A transaction is a single income or expense event. Amounts are always
//! non-negative; the transaction type decides whether the amount adds to or
//! subtracts from the balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use super::period::Month;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Effect of `amount` on the balance: positive for income, negative for expense
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}', expected income or expense",
                other
            )),
        }
    }
}

/// Parse a `YYYY-MM-DD` date; `today` (any case) yields the given date
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, TransactionValidationError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| TransactionValidationError::InvalidDate(input.to_string()))
}

/// Largest accepted amount: one hundred billion units
pub const MAX_AMOUNT: Money = Money::from_cents(10_000_000_000_000);

/// Input for recording a transaction; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: String,
    pub amount: Money,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            note: None,
        }
    }

    /// Shorthand for an income entry
    pub fn income(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self::new(date, TransactionType::Income, category, amount)
    }

    /// Shorthand for an expense entry
    pub fn expense(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self::new(date, TransactionType::Expense, category, amount)
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Validate the input and return it with category and note normalized
    pub fn validate(self) -> Result<Self, TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            category,
            note,
            ..self
        })
    }
}

/// A recorded financial transaction; immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique, monotonically increasing identifier
    pub id: TransactionId,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: String,

    /// Always non-negative
    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Build a transaction from validated input
    pub(crate) fn from_input(id: TransactionId, input: NewTransaction) -> Self {
        Self {
            id,
            date: input.date,
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            note: input.note,
        }
    }

    /// The input that would record this transaction again under a new id
    pub fn to_input(&self) -> NewTransaction {
        NewTransaction {
            date: self.date,
            kind: self.kind,
            category: self.category.clone(),
            amount: self.amount,
            note: self.note.clone(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Effect on the balance (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    InvalidDate(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::EmptyCategory => write!(f, "Category must not be empty"),
            Self::InvalidDate(input) => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD or 'today'", input)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
