use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
}

/// An outstanding debt. Payments are not tracked, so the balance never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: u64,
    pub name: String,
    pub balance: Decimal,
    /// Annual percentage rate, e.g. `18.5` for 18.5% APR.
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
}

impl Debt {
    pub fn new(id: u64, new: NewDebt) -> Self {
        Self {
            id,
            name: new.name,
            balance: new.balance,
            interest_rate: new.interest_rate,
            minimum_payment: new.minimum_payment,
            due_date: new.due_date,
        }
    }
}
