pub mod add;
pub mod budget;
pub mod debt;
pub mod insights;
pub mod metrics;
pub mod remove;
pub mod report;
