pub mod budget;
pub mod debt;
pub mod insight;
pub mod transaction;
