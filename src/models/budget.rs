use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn label(self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
}

/// Spending cap for one category. `spent` only ever grows: it is bumped by
/// matching expense transactions and never rolled back when one is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudget {
    pub id: u64,
    pub category: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
    pub spent: Decimal,
}

impl CategoryBudget {
    pub fn new(id: u64, new: NewBudget) -> Self {
        Self {
            id,
            category: new.category,
            limit: new.limit,
            period: new.period,
            spent: Decimal::ZERO,
        }
    }
}
