mod config;
mod error;
mod models;
mod operations;
mod session;

use clap::Parser;
use config::Config;
use error::FinanceError;
use operations::add::{parse_budget, parse_debt, parse_transaction};
use operations::debt::{avalanche_savings, monthly_interest};
use operations::metrics::category_share;
use operations::remove::parse_id;
use operations::report::{money, run_dashboard};
use session::Session;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, PartialEq, Eq)]
pub enum UserCommands {
    Add,
    AddBudget,
    AddDebt,
    Remove,
    RemoveBudget,
    RemoveDebt,
    Print,
    Budgets,
    Debts,
    Summary,
    Insights,
    Dashboard,
    Help,
    Exit,
    Unknown,
}

const TRANSACTION_PROMPT: &str = "Enter transaction details:\n\
date(YYYY-MM-DD), description, amount, type(income/expense), category[, recurring(yes/no)]";
const BUDGET_PROMPT: &str =
    "Enter budget details:\ncategory, limit[, period(weekly/monthly/yearly)]";
const DEBT_PROMPT: &str = "Enter debt details:\n\
name, balance, interest rate(%), minimum payment, due date(YYYY-MM-DD)";

const HELP: &str = "Commands: add, add-budget, add-debt, remove, remove-budget, remove-debt, \
print, budgets, debts, summary, insights, dashboard, help, exit";

fn main() {
    let config = Config::parse();

    // Logs go to stderr so they never interleave with the prompt on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut session = if config.sample_data {
        Session::with_sample_data()
    } else {
        Session::new()
    };

    println!("Welcome to the budget tracker!");
    println!("{}", HELP);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            println!("Error writing prompt: {}", e);
        }

        let input = match read_user_input() {
            Ok(Some(cmd)) => cmd,
            Ok(None) => break,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        if input.is_empty() {
            continue;
        }

        match check_for_command(&input) {
            UserCommands::Add => {
                let Some(details) = prompt_details(TRANSACTION_PROMPT) else {
                    continue;
                };
                match parse_transaction(&details) {
                    Ok(new) => {
                        let id = session.add_transaction(new);
                        println!("Transaction {} added successfully!", id);
                    }
                    Err(e) => report_error("adding transaction", &FinanceError::from(e)),
                }
            }
            UserCommands::AddBudget => {
                let Some(details) = prompt_details(BUDGET_PROMPT) else {
                    continue;
                };
                match parse_budget(&details) {
                    Ok(new) => {
                        let id = session.add_budget(new);
                        println!("Budget {} added successfully!", id);
                    }
                    Err(e) => report_error("adding budget", &FinanceError::from(e)),
                }
            }
            UserCommands::AddDebt => {
                let Some(details) = prompt_details(DEBT_PROMPT) else {
                    continue;
                };
                match parse_debt(&details) {
                    Ok(new) => {
                        let id = session.add_debt(new);
                        println!("Debt {} added successfully!", id);
                    }
                    Err(e) => report_error("adding debt", &FinanceError::from(e)),
                }
            }
            UserCommands::Remove => {
                let Some(input) = prompt_details("Provide the transaction ID to remove:") else {
                    continue;
                };
                let result = parse_id(&input)
                    .map_err(FinanceError::from)
                    .and_then(|id| session.delete_transaction(id));
                match result {
                    Ok(()) => println!("Transaction removed successfully."),
                    Err(e) => report_error("removing transaction", &e),
                }
            }
            UserCommands::RemoveBudget => {
                let Some(input) = prompt_details("Provide the budget ID to remove:") else {
                    continue;
                };
                let result = parse_id(&input)
                    .map_err(FinanceError::from)
                    .and_then(|id| session.delete_budget(id));
                match result {
                    Ok(()) => println!("Budget removed successfully."),
                    Err(e) => report_error("removing budget", &e),
                }
            }
            UserCommands::RemoveDebt => {
                let Some(input) = prompt_details("Provide the debt ID to remove:") else {
                    continue;
                };
                let result = parse_id(&input)
                    .map_err(FinanceError::from)
                    .and_then(|id| session.delete_debt(id));
                match result {
                    Ok(()) => println!("Debt removed successfully."),
                    Err(e) => report_error("removing debt", &e),
                }
            }
            UserCommands::Print => print_transactions(&session),
            UserCommands::Budgets => print_budgets(&session),
            UserCommands::Debts => print_debts(&session),
            UserCommands::Summary => print_summary(&session),
            UserCommands::Insights => print_insights(&session),
            UserCommands::Dashboard => {
                if let Err(e) = run_dashboard(&session) {
                    report_error("opening dashboard", &e);
                }
            }
            UserCommands::Help => println!("{}", HELP),
            UserCommands::Exit => break,
            UserCommands::Unknown => {
                println!("Unknown command '{}'.", input);
                println!("{}", HELP);
            }
        }
    }

    println!("Exiting the application.");
}

/// `None` on end of input.
fn read_user_input() -> io::Result<Option<String>> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn prompt_details(prompt: &str) -> Option<String> {
    println!("{}", prompt);
    match read_user_input() {
        Ok(details) => details,
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn report_error(action: &str, error: &FinanceError) {
    info!(%error, action, "Rejected request");
    println!("Error {}: {}", action, error);
    println!("Please try again.");
}

fn check_for_command(input: &str) -> UserCommands {
    match input.to_lowercase().as_str() {
        "add" => UserCommands::Add,
        "add-budget" => UserCommands::AddBudget,
        "add-debt" => UserCommands::AddDebt,
        "remove" => UserCommands::Remove,
        "remove-budget" => UserCommands::RemoveBudget,
        "remove-debt" => UserCommands::RemoveDebt,
        "print" => UserCommands::Print,
        "budgets" => UserCommands::Budgets,
        "debts" => UserCommands::Debts,
        "summary" => UserCommands::Summary,
        "insights" => UserCommands::Insights,
        "dashboard" => UserCommands::Dashboard,
        "help" => UserCommands::Help,
        "exit" | "quit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}

fn print_transactions(session: &Session) {
    if session.transactions().is_empty() {
        println!("No transactions recorded.");
        return;
    }
    for t in session.transactions() {
        println!(
            "#{} {} {:<7} {:>12} {:<15} {}{}",
            t.id,
            t.date,
            t.transaction_type.label(),
            money(t.amount),
            t.category,
            t.description,
            if t.recurring { " (recurring)" } else { "" }
        );
    }
}

fn print_budgets(session: &Session) {
    if session.budgets().is_empty() {
        println!("No budgets set.");
        return;
    }
    for b in session.budgets() {
        let usage = match session.budget_usage(b) {
            Some(p) => format!("{}%", p),
            None => "n/a".to_string(),
        };
        println!(
            "#{} {:<15} {:<8} spent {} of {} ({})",
            b.id,
            b.category,
            b.period.label(),
            money(b.spent),
            money(b.limit),
            usage
        );
    }
}

fn print_debts(session: &Session) {
    if session.debts().is_empty() {
        println!("No debts recorded.");
        return;
    }
    for d in session.debts() {
        println!(
            "#{} {:<15} {} at {}% APR, min {}, due {}, interest {}/month",
            d.id,
            d.name,
            money(d.balance),
            d.interest_rate.normalize(),
            money(d.minimum_payment),
            d.due_date,
            money(monthly_interest(d))
        );
    }
    println!(
        "Recommended: Use Avalanche method to save ${} in interest over time.",
        avalanche_savings(session.debts())
    );
}

fn print_summary(session: &Session) {
    let aggregates = session.aggregates();
    println!("Total income:   {}", money(aggregates.total_income));
    println!("Total expenses: {}", money(aggregates.total_expenses));
    println!("Net income:     {}", money(aggregates.net_income));
    println!("Total debt:     {}", money(aggregates.total_debt));
    for slice in category_share(&aggregates) {
        println!("  {:<15} {:>12} {:>4}%", slice.name, money(slice.value), slice.percent);
    }
}

fn print_insights(session: &Session) {
    for insight in session.insights() {
        println!("[{}] {}: {}", insight.kind.label(), insight.title, insight.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[test]
    fn test_check_for_command() {
        assert_eq!(check_for_command("add"), UserCommands::Add);
        assert_eq!(check_for_command("Add-Budget"), UserCommands::AddBudget);
        assert_eq!(check_for_command("remove-debt"), UserCommands::RemoveDebt);
        assert_eq!(check_for_command("quit"), UserCommands::Exit);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logs_at(level: Level) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            report_error("removing budget", &FinanceError::BudgetNotFound(3));
        });

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_rejected_input_is_quiet_at_default_level() {
        assert!(logs_at(Level::WARN).is_empty());
        assert!(logs_at(Level::INFO).contains("Rejected request"));
    }

    #[test]
    fn test_unknown_command_does_not_exit() {
        assert_eq!(check_for_command("delete everything"), UserCommands::Unknown);
    }
}
