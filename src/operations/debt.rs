use crate::models::debt::Debt;
use crate::operations::metrics::round_to;
use rust_decimal::Decimal;

const MONTHS_PER_YEAR: i64 = 12;

/// Share of yearly interest assumed to be saved by paying highest-rate debts first.
const AVALANCHE_SAVINGS_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

pub fn yearly_interest(debt: &Debt) -> Decimal {
    debt.balance * debt.interest_rate / Decimal::ONE_HUNDRED
}

/// Interest accrued in one month, rounded to cents.
pub fn monthly_interest(debt: &Debt) -> Decimal {
    round_to(yearly_interest(debt) / Decimal::from(MONTHS_PER_YEAR), 2)
}

/// Rough interest saved with the avalanche method, in whole units.
pub fn avalanche_savings(debts: &[Debt]) -> Decimal {
    let yearly = debts
        .iter()
        .fold(Decimal::ZERO, |acc, debt| acc + yearly_interest(debt));
    round_to(yearly * AVALANCHE_SAVINGS_RATIO, 0)
}
