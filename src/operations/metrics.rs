use crate::models::debt::Debt;
use crate::models::transaction::{Transaction, TransactionType};
use rust_decimal::{Decimal, RoundingStrategy};

/// Headline figures derived from the current collections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregates {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub total_debt: Decimal,
    /// Expense totals keyed by category, in first-occurrence order.
    pub category_expenses: Vec<(String, Decimal)>,
}

/// One pie slice of the expense breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
    pub percent: Decimal,
}

pub fn compute_aggregates(transactions: &[Transaction], debts: &[Debt]) -> Aggregates {
    let total_income = total_by_type(transactions, TransactionType::Income);
    let total_expenses = total_by_type(transactions, TransactionType::Expense);

    Aggregates {
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        total_debt: total_debt(debts),
        category_expenses: category_expenses(transactions),
    }
}

pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .fold(Decimal::ZERO, |acc, transaction| acc + transaction.amount)
}

pub fn total_debt(debts: &[Debt]) -> Decimal {
    debts.iter().fold(Decimal::ZERO, |acc, debt| acc + debt.balance)
}

pub fn category_expenses(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.category.clone(), transaction.amount)),
        }
    }
    totals
}

/// Expense breakdown for the pie chart. Empty when nothing was spent.
pub fn category_share(aggregates: &Aggregates) -> Vec<CategorySlice> {
    if aggregates.total_expenses <= Decimal::ZERO {
        return Vec::new();
    }

    aggregates
        .category_expenses
        .iter()
        .map(|(name, value)| CategorySlice {
            name: name.clone(),
            value: *value,
            percent: round_to(*value / aggregates.total_expenses * Decimal::ONE_HUNDRED, 0),
        })
        .collect()
}

/// Rounds half away from zero, the way amounts are shown to the user.
pub fn round_to(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}
