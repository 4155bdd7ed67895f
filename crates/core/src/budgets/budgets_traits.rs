use async_trait::async_trait;

use crate::budgets::budgets_model::{Budget, BudgetAlert, BudgetSummary, NewBudget};
use crate::errors::Result;

/// Trait for budget repository operations.
///
/// Implementations are expected to enforce the (user, category, month, year)
/// uniqueness durably and surface a violation as
/// `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_by_id(&self, id: &str) -> Result<Option<Budget>>;
    fn find_by_user_category_month_year(
        &self,
        user_id: &str,
        category_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>>;
    fn find_by_user_and_month_year(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Budget>>;
    async fn create(&self, budget: Budget) -> Result<Budget>;
    async fn update(&self, budget: Budget) -> Result<Budget>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<BudgetSummary>;
    async fn update_budget(
        &self,
        id: &str,
        user_id: &str,
        update: NewBudget,
    ) -> Result<BudgetSummary>;
    async fn delete_budget(&self, id: &str, user_id: &str) -> Result<()>;
    fn get_budget(&self, id: &str, user_id: &str) -> Result<BudgetSummary>;
    fn list_budgets(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<BudgetSummary>>;
    /// Alerts for the clock's current month: budgets at >= 80% usage.
    fn get_budget_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>>;
}
