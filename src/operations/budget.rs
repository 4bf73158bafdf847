use crate::models::budget::CategoryBudget;
use crate::models::transaction::Transaction;
use crate::operations::metrics::round_to;
use rust_decimal::Decimal;

/// Visual severity of a budget's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBand {
    Nominal,
    Warning,
    Critical,
}

/// Budget-vs-actual bar chart record.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetBar {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
}

/// Charges an expense against every budget whose category matches exactly.
/// Income transactions leave budgets untouched. Returns the number of budgets updated.
pub fn apply_budget_consumption(
    budgets: &mut [CategoryBudget],
    transaction: &Transaction,
) -> usize {
    if !transaction.is_expense() {
        return 0;
    }

    let mut updated = 0;
    for budget in budgets
        .iter_mut()
        .filter(|budget| budget.category == transaction.category)
    {
        budget.spent += transaction.amount;
        updated += 1;
    }
    updated
}

/// `round(spent / limit * 100)`, unclamped. `None` when the limit is zero.
pub fn usage_percentage(budget: &CategoryBudget) -> Option<Decimal> {
    percent_of(budget.spent, budget.limit)
}

/// `None` for a zero limit, or when the ratio does not fit in a `Decimal`.
pub fn percent_of(spent: Decimal, limit: Decimal) -> Option<Decimal> {
    if limit.is_zero() {
        return None;
    }
    let percentage = spent.checked_div(limit)?.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_to(percentage, 0))
}

pub fn usage_band(percentage: Option<Decimal>) -> UsageBand {
    match percentage {
        Some(p) if p > Decimal::from(90) => UsageBand::Critical,
        Some(p) if p > Decimal::from(70) => UsageBand::Warning,
        Some(_) => UsageBand::Nominal,
        None => UsageBand::Critical,
    }
}

/// Width of a usage bar, capped at a full bar.
pub fn bar_fill_percent(percentage: Option<Decimal>) -> Decimal {
    percentage
        .unwrap_or(Decimal::ONE_HUNDRED)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub fn budget_bars(budgets: &[CategoryBudget]) -> Vec<BudgetBar> {
    budgets
        .iter()
        .map(|budget| BudgetBar {
            category: budget.category.clone(),
            limit: budget.limit,
            spent: budget.spent,
        })
        .collect()
}
