use rust_decimal::Decimal;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// A transaction as submitted by the user, before the session assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: String,
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: String,
    // Informational only.
    pub recurring: bool,
}

impl Transaction {
    pub fn new(id: u64, new: NewTransaction) -> Self {
        Self {
            id,
            date: new.date,
            description: new.description,
            amount: new.amount,
            transaction_type: new.transaction_type,
            category: new.category,
            recurring: new.recurring,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}
