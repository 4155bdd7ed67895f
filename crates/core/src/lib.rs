//! Core domain logic for the personal finance tracker.
//!
//! This crate is database-agnostic: services depend on repository traits
//! and a clock trait, and the storage/runtime layers plug in behind them.
//! It covers transactions, categories, spending aggregation, and monthly
//! category budgets with threshold alerts and end-of-month forecasts.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod money;
pub mod spending;
pub mod transactions;
pub mod utils;

pub use errors::{Error, Result};
pub use money::MoneyAmount;
