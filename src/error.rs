use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised at the input boundary, before any collection is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Invalid number of details provided. \
         Expected {expected} details separated by commas but got {got}"
    )]
    FieldCount { expected: String, got: usize },
    #[error("{0} cannot be empty")]
    MissingField(&'static str),
    #[error("Invalid {field} '{value}'. Please provide a valid decimal number.")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: Decimal,
        max: Decimal,
    },
    #[error("Invalid date '{0}'. Please use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid transaction type '{0}'. Use 'income' or 'expense'.")]
    InvalidTransactionType(String),
    #[error("Invalid budget period '{0}'. Use 'weekly', 'monthly' or 'yearly'.")]
    InvalidPeriod(String),
    #[error("Invalid recurring flag '{0}'. Use 'yes' or 'no'.")]
    InvalidRecurring(String),
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid ID '{0}'. Please provide a numeric ID.")]
    InvalidId(String),
}

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction with ID {0} not found")]
    TransactionNotFound(u64),
    #[error("Budget with ID {0} not found")]
    BudgetNotFound(u64),
    #[error("Debt with ID {0} not found")]
    DebtNotFound(u64),
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
