//! Budget domain models and derived evaluation/alert shapes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::MoneyAmount;

/// A monthly spending limit for one category.
///
/// The tuple (user, category, month, year) is unique. The registry
/// pre-checks it and the durable store's constraint is the final authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub limit_amount: MoneyAmount,
    /// 1-12.
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating or updating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: String,
    pub limit_amount: MoneyAmount,
    pub month: u32,
    pub year: i32,
}

/// A budget checked against actual spending.
///
/// Derived, never persisted: recomputed on every read so it is always
/// consistent with the current transaction set.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEvaluation {
    pub budget: Budget,
    pub spending: MoneyAmount,
    /// Percentage of the limit used. The spending/limit ratio is rounded
    /// half-up at 4 decimal digits before the x100 scaling.
    pub percentage_used: Decimal,
    /// `limit - spending`; negative when exceeded.
    pub remaining: MoneyAmount,
    /// `spending > limit`, strict.
    pub exceeded: bool,
}

/// Wire shape of an evaluated budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub limit_amount: MoneyAmount,
    pub current_spending: MoneyAmount,
    pub month: u32,
    pub year: i32,
    pub percentage_used: f64,
    pub is_exceeded: bool,
    pub remaining: MoneyAmount,
    pub created_at: DateTime<Utc>,
}

/// Alert severity. Serializes as exactly `WARNING` / `DANGER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Warning,
    Danger,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Warning => write!(f, "WARNING"),
            AlertLevel::Danger => write!(f, "DANGER"),
        }
    }
}

/// Threshold alert for one current-month budget at >= 80% usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub budget_id: String,
    pub category_name: String,
    pub limit_amount: MoneyAmount,
    pub current_spending: MoneyAmount,
    pub percentage_used: f64,
    pub days_left_in_month: u32,
    pub alert_level: AlertLevel,
    pub message: String,
    pub forecast: SpendingForecast,
}

/// End-of-month projection from the current spending pace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingForecast {
    pub daily_average: MoneyAmount,
    pub projected_spending: MoneyAmount,
    pub will_exceed: bool,
    /// Present only when the pace projects an overage.
    pub projected_exceed_date: Option<NaiveDate>,
}
