//! Rule-based advisory messages.
//!
//! The list is always rebuilt from scratch and keeps a fixed shape: the savings
//! rate first, then one warning per budget over threshold (in budget order), at
//! most one high-interest debt alert, and the spending forecast last.

use crate::models::budget::CategoryBudget;
use crate::models::debt::Debt;
use crate::models::insight::{Insight, InsightKind};
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::budget::usage_percentage;
use crate::operations::metrics::{round_to, total_by_type};
use rust_decimal::Decimal;

const BUDGET_WARNING_PERCENT: i64 = 80;
const HIGH_INTEREST_RATE: i64 = 15;
/// Expenses are averaged over a fixed sample window, not the observed date span.
const FORECAST_SAMPLE_DAYS: i64 = 5;
const FORECAST_HORIZON_DAYS: i64 = 30;

pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &[CategoryBudget],
    debts: &[Debt],
) -> Vec<Insight> {
    let total_income = total_by_type(transactions, TransactionType::Income);
    let total_expenses = total_by_type(transactions, TransactionType::Expense);

    let mut insights = vec![savings_rate_insight(total_income, total_expenses)];
    insights.extend(budgets.iter().filter_map(budget_warning));
    insights.extend(high_interest_alert(debts));
    insights.push(forecast_insight(total_expenses));
    insights
}

/// Percentage of income kept, to one decimal place. `None` without income,
/// or when the rate does not fit in a `Decimal`.
pub fn savings_rate(total_income: Decimal, total_expenses: Decimal) -> Option<Decimal> {
    if total_income.is_zero() {
        return None;
    }
    let rate = total_income
        .checked_sub(total_expenses)?
        .checked_div(total_income)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_to(rate, 1))
}

/// Saturates at `Decimal::MAX`.
pub fn projected_monthly_spending(total_expenses: Decimal) -> Decimal {
    let average_daily = total_expenses / Decimal::from(FORECAST_SAMPLE_DAYS);
    average_daily
        .checked_mul(Decimal::from(FORECAST_HORIZON_DAYS))
        .map_or(Decimal::MAX, |projected| round_to(projected, 0))
}

fn savings_rate_insight(total_income: Decimal, total_expenses: Decimal) -> Insight {
    match savings_rate(total_income, total_expenses) {
        Some(rate) => Insight::new(
            InsightKind::Positive,
            "Savings Rate",
            format!("You are saving {:.1}% of your income. Great job!", rate),
        ),
        None => Insight::new(
            InsightKind::Info,
            "Savings Rate",
            "No income recorded yet, so a savings rate cannot be calculated.",
        ),
    }
}

fn budget_warning(budget: &CategoryBudget) -> Option<Insight> {
    // Zero-limit budgets have no percentage and never warn.
    let percentage = usage_percentage(budget)?;
    if percentage <= Decimal::from(BUDGET_WARNING_PERCENT) {
        return None;
    }
    Some(Insight::new(
        InsightKind::Warning,
        format!("{} Budget Alert", budget.category),
        format!(
            "You have used {}% of your {} budget.",
            percentage, budget.category
        ),
    ))
}

/// Names the first qualifying debt in collection order, not the highest rate.
fn high_interest_alert(debts: &[Debt]) -> Option<Insight> {
    let debt = debts
        .iter()
        .find(|debt| debt.interest_rate > Decimal::from(HIGH_INTEREST_RATE))?;
    Some(Insight::new(
        InsightKind::Alert,
        "High Interest Debt",
        format!(
            "Consider paying off {} first ({}% APR) to save on interest.",
            debt.name,
            debt.interest_rate.normalize()
        ),
    ))
}

fn forecast_insight(total_expenses: Decimal) -> Insight {
    Insight::new(
        InsightKind::Info,
        "Spending Forecast",
        format!(
            "Based on current trends, you will spend ${} this month.",
            projected_monthly_spending(total_expenses)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::{BudgetPeriod, NewBudget};
    use crate::models::debt::NewDebt;
    use crate::models::transaction::NewTransaction;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn create_test_transaction(
        id: u64,
        transaction_type: TransactionType,
        amount: &str,
        category: &str,
    ) -> Transaction {
        Transaction::new(
            id,
            NewTransaction {
                date: NaiveDate::from_ymd_opt(2025, 11, 1).expect("Invalid date"),
                description: "Test Description".to_string(),
                amount: Decimal::from_str(amount).unwrap(),
                transaction_type,
                category: category.to_string(),
                recurring: false,
            },
        )
    }

    fn create_test_budget(id: u64, category: &str, limit: &str, spent: &str) -> CategoryBudget {
        let mut budget = CategoryBudget::new(
            id,
            NewBudget {
                category: category.to_string(),
                limit: Decimal::from_str(limit).unwrap(),
                period: BudgetPeriod::Monthly,
            },
        );
        budget.spent = Decimal::from_str(spent).unwrap();
        budget
    }

    fn create_test_debt(id: u64, name: &str, rate: &str) -> Debt {
        Debt::new(
            id,
            NewDebt {
                name: name.to_string(),
                balance: Decimal::from(1000),
                interest_rate: Decimal::from_str(rate).unwrap(),
                minimum_payment: Decimal::from(25),
                due_date: NaiveDate::from_ymd_opt(2025, 11, 15).expect("Invalid date"),
            },
        )
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(1, TransactionType::Income, "5000", "Salary"),
            create_test_transaction(2, TransactionType::Expense, "1200", "Rent"),
            create_test_transaction(3, TransactionType::Expense, "150", "Groceries"),
            create_test_transaction(4, TransactionType::Expense, "80", "Utilities"),
            create_test_transaction(5, TransactionType::Expense, "200", "Entertainment"),
            create_test_transaction(6, TransactionType::Income, "500", "Freelance"),
        ]
    }

    fn sample_debts() -> Vec<Debt> {
        vec![
            create_test_debt(1, "Credit Card", "18.5"),
            create_test_debt(2, "Student Loan", "5.5"),
            create_test_debt(3, "Car Loan", "4.2"),
        ]
    }

    #[test]
    fn test_savings_rate_for_sample_data() {
        let insights = generate_insights(&sample_transactions(), &[], &[]);
        assert_eq!(insights[0].kind, InsightKind::Positive);
        assert_eq!(insights[0].title, "Savings Rate");
        assert_eq!(
            insights[0].message,
            "You are saving 70.4% of your income. Great job!"
        );
    }

    #[test]
    fn test_savings_rate_always_shows_one_decimal() {
        let transactions = vec![
            create_test_transaction(1, TransactionType::Income, "100", "Salary"),
            create_test_transaction(2, TransactionType::Expense, "50", "Rent"),
        ];
        let insights = generate_insights(&transactions, &[], &[]);
        assert!(insights[0].message.contains("50.0%"));
    }

    #[test]
    fn test_savings_rate_can_be_negative() {
        assert_eq!(
            savings_rate(Decimal::from(100), Decimal::from(250)),
            Some(Decimal::from(-150))
        );
    }

    #[test]
    fn test_zero_income_emits_info_sentinel_first() {
        let transactions = vec![create_test_transaction(1, TransactionType::Expense, "40", "Food")];
        let insights = generate_insights(&transactions, &[], &[]);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert_eq!(insights[0].title, "Savings Rate");
        assert!(insights[0].message.contains("No income"));
        assert_eq!(savings_rate(Decimal::ZERO, Decimal::from(40)), None);
    }

    #[test]
    fn test_empty_state_has_savings_and_forecast_only() {
        let insights = generate_insights(&[], &[], &[]);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Savings Rate", "Spending Forecast"]);
        assert!(insights[1].message.contains("$0 "));
    }

    #[test]
    fn test_budget_over_threshold_warns() {
        let budgets = vec![
            create_test_budget(1, "Groceries", "500", "150"),
            create_test_budget(2, "Entertainment", "300", "400"),
        ];
        let insights = generate_insights(&sample_transactions(), &budgets, &[]);

        let warnings: Vec<&Insight> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].title, "Entertainment Budget Alert");
        assert_eq!(
            warnings[0].message,
            "You have used 133% of your Entertainment budget."
        );
    }

    #[test]
    fn test_budget_threshold_uses_rounded_percentage() {
        // 80.4% rounds to 80 and stays quiet, 80.5% rounds to 81 and warns.
        let quiet = create_test_budget(1, "A", "1000", "804");
        let loud = create_test_budget(2, "B", "1000", "805");
        assert!(budget_warning(&quiet).is_none());
        assert!(budget_warning(&loud).is_some());
    }

    #[test]
    fn test_zero_limit_budget_is_excluded_from_warnings() {
        let budgets = vec![create_test_budget(1, "Gifts", "0", "50")];
        let insights = generate_insights(&sample_transactions(), &budgets, &[]);
        assert!(insights.iter().all(|i| i.kind != InsightKind::Warning));
    }

    #[test]
    fn test_warnings_follow_budget_order() {
        let budgets = vec![
            create_test_budget(1, "Travel", "100", "95"),
            create_test_budget(2, "Dining", "100", "85"),
        ];
        let insights = generate_insights(&[], &budgets, &[]);
        assert_eq!(insights[1].title, "Travel Budget Alert");
        assert_eq!(insights[2].title, "Dining Budget Alert");
    }

    #[test]
    fn test_high_interest_alert_names_credit_card() {
        let insights = generate_insights(&sample_transactions(), &[], &sample_debts());
        let alerts: Vec<&Insight> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Alert)
            .collect();

        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts[0].message,
            "Consider paying off Credit Card first (18.5% APR) to save on interest."
        );
    }

    #[test]
    fn test_high_interest_alert_reports_first_match_not_highest_rate() {
        let debts = vec![
            create_test_debt(1, "Store Card", "16"),
            create_test_debt(2, "Payday Loan", "39.9"),
        ];
        let alert = high_interest_alert(&debts).unwrap();
        assert!(alert.message.contains("Store Card"));
        assert!(!alert.message.contains("Payday Loan"));
    }

    #[test]
    fn test_rate_of_exactly_fifteen_is_not_high_interest() {
        let debts = vec![create_test_debt(1, "Personal Loan", "15")];
        assert!(high_interest_alert(&debts).is_none());
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let tiny = "0.0000000000000000000000000001";
        let transactions = vec![
            create_test_transaction(1, TransactionType::Income, tiny, "Interest"),
            create_test_transaction(2, TransactionType::Expense, "1000", "Snacks"),
        ];
        let budgets = vec![create_test_budget(1, "Snacks", tiny, "1000")];

        let insights = generate_insights(&transactions, &budgets, &[]);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Savings Rate", "Spending Forecast"]);
        assert_eq!(insights[0].kind, InsightKind::Info);

        assert_eq!(projected_monthly_spending(Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_spending_forecast() {
        assert_eq!(projected_monthly_spending(Decimal::from(1630)), Decimal::from(9780));

        let insights = generate_insights(&sample_transactions(), &[], &[]);
        let forecast = insights.last().unwrap();
        assert_eq!(forecast.kind, InsightKind::Info);
        assert_eq!(forecast.title, "Spending Forecast");
        assert_eq!(
            forecast.message,
            "Based on current trends, you will spend $9780 this month."
        );
    }

    #[test]
    fn test_full_list_order() {
        let budgets = vec![create_test_budget(1, "Entertainment", "300", "400")];
        let insights = generate_insights(&sample_transactions(), &budgets, &sample_debts());

        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Positive,
                InsightKind::Warning,
                InsightKind::Alert,
                InsightKind::Info,
            ]
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let transactions = sample_transactions();
        let budgets = vec![create_test_budget(1, "Entertainment", "300", "400")];
        let debts = sample_debts();

        let first = generate_insights(&transactions, &budgets, &debts);
        let second = generate_insights(&transactions, &budgets, &debts);
        assert_eq!(first, second);
    }
}
