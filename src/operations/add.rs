use crate::error::ValidationError;
use crate::models::budget::{BudgetPeriod, NewBudget};
use crate::models::debt::NewDebt;
use crate::models::transaction::{NewTransaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_CATEGORY_LEN: usize = 50;

/// One cent.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// 10^15, far above any household figure and far below `Decimal::MAX`.
const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);
const MAX_INTEREST_RATE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// `date, description, amount, type, category[, recurring]`
pub fn parse_transaction(details: &str) -> Result<NewTransaction, ValidationError> {
    let parts = split_details(details, 5, 6)?;

    let date = parse_date(parts[0])?;
    let description = required_text("Description", parts[1], MAX_DESCRIPTION_LEN)?;
    let amount = parse_positive("amount", parts[2])?;

    let transaction_type = match parts[3].to_lowercase().as_str() {
        "income" => TransactionType::Income,
        "expense" => TransactionType::Expense,
        other => return Err(ValidationError::InvalidTransactionType(other.to_string())),
    };

    let category = required_text("Category", parts[4], MAX_CATEGORY_LEN)?;

    let recurring = match parts.get(5) {
        Some(flag) => parse_flag(flag)?,
        None => false,
    };

    Ok(NewTransaction {
        date,
        description,
        amount,
        transaction_type,
        category,
        recurring,
    })
}

/// `category, limit[, period]`, period defaults to monthly.
pub fn parse_budget(details: &str) -> Result<NewBudget, ValidationError> {
    let parts = split_details(details, 2, 3)?;

    let category = required_text("Category", parts[0], MAX_CATEGORY_LEN)?;
    let limit = parse_positive("limit", parts[1])?;

    let period = match parts.get(2).map(|p| p.to_lowercase()) {
        None => BudgetPeriod::Monthly,
        Some(p) => match p.as_str() {
            "weekly" => BudgetPeriod::Weekly,
            "monthly" => BudgetPeriod::Monthly,
            "yearly" => BudgetPeriod::Yearly,
            _ => return Err(ValidationError::InvalidPeriod(p)),
        },
    };

    Ok(NewBudget {
        category,
        limit,
        period,
    })
}

/// `name, balance, interest rate, minimum payment, due date`
pub fn parse_debt(details: &str) -> Result<NewDebt, ValidationError> {
    let parts = split_details(details, 5, 5)?;

    let name = required_text("Name", parts[0], MAX_CATEGORY_LEN)?;
    let balance = parse_positive("balance", parts[1])?;
    let interest_rate = parse_non_negative("interest rate", parts[2], MAX_INTEREST_RATE)?;
    let minimum_payment = parse_non_negative("minimum payment", parts[3], MAX_AMOUNT)?;
    let due_date = parse_date(parts[4])?;

    Ok(NewDebt {
        name,
        balance,
        interest_rate,
        minimum_payment,
        due_date,
    })
}

fn split_details(details: &str, min: usize, max: usize) -> Result<Vec<&str>, ValidationError> {
    let parts: Vec<&str> = details.split(',').map(|s| s.trim()).collect();
    if parts.len() < min || parts.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        return Err(ValidationError::FieldCount {
            expected,
            got: parts.len(),
        });
    }
    Ok(parts)
}

fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

fn required_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::TooLong { field, max: max_len });
    }
    Ok(value.to_string())
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(value).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_positive(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    let amount = parse_decimal(field, value)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    check_range(field, amount, MIN_AMOUNT, MAX_AMOUNT)
}

fn parse_non_negative(
    field: &'static str,
    value: &str,
    max: Decimal,
) -> Result<Decimal, ValidationError> {
    let amount = parse_decimal(field, value)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative(field));
    }
    check_range(field, amount, Decimal::ZERO, max)
}

fn check_range(
    field: &'static str,
    amount: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, ValidationError> {
    if amount < min || amount > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(amount)
}

fn parse_flag(value: &str) -> Result<bool, ValidationError> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" | "recurring" => Ok(true),
        "no" | "n" | "false" | "" => Ok(false),
        _ => Err(ValidationError::InvalidRecurring(value.to_string())),
    }
}
