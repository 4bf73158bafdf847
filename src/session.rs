//! Session-scoped owner of the three collections and the derived insight list.
//!
//! Every mutation is followed by a synchronous rebuild of the insights, so readers
//! never observe a stale list.

use crate::error::FinanceError;
use crate::models::budget::{BudgetPeriod, CategoryBudget, NewBudget};
use crate::models::debt::{Debt, NewDebt};
use crate::models::insight::Insight;
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::operations::budget::{apply_budget_consumption, usage_percentage};
use crate::operations::insights::generate_insights;
use crate::operations::metrics::{compute_aggregates, Aggregates};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub struct Session {
    transactions: Vec<Transaction>,
    budgets: Vec<CategoryBudget>,
    debts: Vec<Debt>,
    insights: Vec<Insight>,
    next_transaction_id: u64,
    next_budget_id: u64,
    next_debt_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            debts: Vec::new(),
            insights: Vec::new(),
            next_transaction_id: 1,
            next_budget_id: 1,
            next_debt_id: 1,
        };
        session.recompute_insights();
        session
    }

    /// A session pre-filled with a month of example activity.
    pub fn with_sample_data() -> Self {
        let transactions = sample_transactions();
        let budgets = sample_budgets();
        let debts = sample_debts();

        let mut session = Self {
            next_transaction_id: next_id(transactions.iter().map(|t| t.id)),
            next_budget_id: next_id(budgets.iter().map(|b| b.id)),
            next_debt_id: next_id(debts.iter().map(|d| d.id)),
            transactions,
            budgets,
            debts,
            insights: Vec::new(),
        };
        session.recompute_insights();
        info!(
            transactions = session.transactions.len(),
            budgets = session.budgets.len(),
            debts = session.debts.len(),
            "Loaded sample data"
        );
        session
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[CategoryBudget] {
        &self.budgets
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn aggregates(&self) -> Aggregates {
        compute_aggregates(&self.transactions, &self.debts)
    }

    pub fn budget_usage(&self, budget: &CategoryBudget) -> Option<Decimal> {
        usage_percentage(budget)
    }

    /// Appends the transaction, then charges it against matching budgets.
    pub fn add_transaction(&mut self, new: NewTransaction) -> u64 {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;

        let transaction = Transaction::new(id, new);
        let charged = apply_budget_consumption(&mut self.budgets, &transaction);
        info!(
            id,
            kind = transaction.transaction_type.label(),
            amount = %transaction.amount,
            category = %transaction.category,
            budgets_charged = charged,
            "Added transaction"
        );
        self.transactions.push(transaction);

        self.recompute_insights();
        id
    }

    pub fn add_budget(&mut self, new: NewBudget) -> u64 {
        let id = self.next_budget_id;
        self.next_budget_id += 1;

        let budget = CategoryBudget::new(id, new);
        info!(id, category = %budget.category, limit = %budget.limit, "Added budget");
        self.budgets.push(budget);

        self.recompute_insights();
        id
    }

    pub fn add_debt(&mut self, new: NewDebt) -> u64 {
        let id = self.next_debt_id;
        self.next_debt_id += 1;

        let debt = Debt::new(id, new);
        info!(id, name = %debt.name, balance = %debt.balance, "Added debt");
        self.debts.push(debt);

        self.recompute_insights();
        id
    }

    /// Budgets already charged by this transaction keep their `spent`.
    pub fn delete_transaction(&mut self, id: u64) -> Result<(), FinanceError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(FinanceError::TransactionNotFound(id))?;
        self.transactions.remove(pos);
        info!(id, "Removed transaction");

        self.recompute_insights();
        Ok(())
    }

    pub fn delete_budget(&mut self, id: u64) -> Result<(), FinanceError> {
        let pos = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or(FinanceError::BudgetNotFound(id))?;
        self.budgets.remove(pos);
        info!(id, "Removed budget");

        self.recompute_insights();
        Ok(())
    }

    pub fn delete_debt(&mut self, id: u64) -> Result<(), FinanceError> {
        let pos = self
            .debts
            .iter()
            .position(|d| d.id == id)
            .ok_or(FinanceError::DebtNotFound(id))?;
        self.debts.remove(pos);
        info!(id, "Removed debt");

        self.recompute_insights();
        Ok(())
    }

    fn recompute_insights(&mut self) {
        self.insights = generate_insights(&self.transactions, &self.budgets, &self.debts);
        debug!(count = self.insights.len(), "Recomputed insights");
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

fn sample_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).unwrap_or_default()
}

fn sample_transactions() -> Vec<Transaction> {
    let rows = [
        (TransactionType::Income, 5000, "Salary", "Monthly Salary", 1, true),
        (TransactionType::Expense, 1200, "Rent", "Monthly Rent", 1, true),
        (TransactionType::Expense, 150, "Groceries", "Weekly Shopping", 2, false),
        (TransactionType::Expense, 80, "Utilities", "Electric Bill", 3, false),
        (TransactionType::Expense, 200, "Entertainment", "Concert Tickets", 4, false),
        (TransactionType::Income, 500, "Freelance", "Design Project", 5, false),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(idx, (transaction_type, amount, category, description, day, recurring))| {
            Transaction::new(
                idx as u64 + 1,
                NewTransaction {
                    date: sample_date(day),
                    description: description.to_string(),
                    amount: Decimal::from(amount),
                    transaction_type,
                    category: category.to_string(),
                    recurring,
                },
            )
        })
        .collect()
}

fn sample_budgets() -> Vec<CategoryBudget> {
    let rows = [
        ("Groceries", 500, 150),
        ("Entertainment", 300, 200),
        ("Utilities", 200, 80),
        ("Transportation", 250, 0),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(idx, (category, limit, spent))| CategoryBudget {
            id: idx as u64 + 1,
            category: category.to_string(),
            limit: Decimal::from(limit),
            period: BudgetPeriod::Monthly,
            spent: Decimal::from(spent),
        })
        .collect()
}

fn sample_debts() -> Vec<Debt> {
    let rows = [
        ("Credit Card", 2500, Decimal::new(185, 1), 75, 15),
        ("Student Loan", 15000, Decimal::new(55, 1), 200, 20),
        ("Car Loan", 8000, Decimal::new(42, 1), 350, 10),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(idx, (name, balance, interest_rate, minimum_payment, due_day))| {
            Debt::new(
                idx as u64 + 1,
                NewDebt {
                    name: name.to_string(),
                    balance: Decimal::from(balance),
                    interest_rate,
                    minimum_payment: Decimal::from(minimum_payment),
                    due_date: sample_date(due_day),
                },
            )
        })
        .collect()
}
