//! Monthly category budgets: lifecycle, evaluation, alerts, and forecasts.

mod budgets_alerts;
mod budgets_forecast;
mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{
    AlertLevel, Budget, BudgetAlert, BudgetEvaluation, BudgetSummary, NewBudget, SpendingForecast,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
