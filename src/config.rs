use clap::{ArgAction, Parser};

#[derive(Clone, Debug, Parser)]
#[command(
    author,
    version,
    about = "Interactive budget tracker with rule-based insights",
    long_about = None
)]
pub struct Config {
    /// Seed the session with example transactions, budgets and debts.
    #[arg(long, env = "FINO_SAMPLE_DATA", default_value_t = true, action = ArgAction::Set)]
    pub sample_data: bool,

    /// Log filter directive, e.g. `info` or `fino_insights=debug`.
    #[arg(long, env = "FINO_LOG", default_value = "warn")]
    pub log_filter: String,
}
