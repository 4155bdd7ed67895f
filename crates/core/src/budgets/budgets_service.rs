//! Budget lifecycle and evaluation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use log::{debug, info};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::categories::{Category, CategoryRepositoryTrait};
use crate::constants::{MAX_BUDGET_YEAR, MIN_BUDGET_YEAR, PERCENTAGE_SCALE};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::money::MoneyAmount;
use crate::spending::SpendingServiceTrait;
use crate::utils::{month_period, ClockTrait};

use super::budgets_alerts::classify;
use super::budgets_forecast::estimate;
use super::budgets_model::{Budget, BudgetAlert, BudgetEvaluation, BudgetSummary, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

/// Percentage of `limit` consumed by `spending`.
///
/// The spending/limit ratio is rounded half-up at 4 decimal digits before
/// the x100 scaling, so 2300/3000 reports 76.67 rather than 76.66. A zero
/// limit or zero spending reads as 0% used rather than an error.
pub(crate) fn percentage_used(spending: MoneyAmount, limit: MoneyAmount) -> Result<Decimal> {
    if limit.is_zero() || spending.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = spending.div_with_rounding(limit, PERCENTAGE_SCALE)?;
    Ok(ratio * Decimal::ONE_HUNDRED)
}

/// Service for budget CRUD, evaluation against actual spending, and
/// threshold alerts.
///
/// Evaluations are always derived on read; nothing here caches spending.
pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    spending_service: Arc<dyn SpendingServiceTrait>,
    clock: Arc<dyn ClockTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        spending_service: Arc<dyn SpendingServiceTrait>,
        clock: Arc<dyn ClockTrait>,
    ) -> Self {
        BudgetService {
            budget_repository,
            category_repository,
            spending_service,
            clock,
        }
    }

    fn validate_period(month: u32, year: i32) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidInput(format!(
                "month must be between 1 and 12, got {}",
                month
            ))
            .into());
        }
        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&year) {
            return Err(ValidationError::InvalidInput(format!(
                "year must be between {} and {}, got {}",
                MIN_BUDGET_YEAR, MAX_BUDGET_YEAR, year
            ))
            .into());
        }
        Ok(())
    }

    fn validate(new_budget: &NewBudget) -> Result<()> {
        if !new_budget.limit_amount.is_positive() {
            return Err(ValidationError::InvalidInput(format!(
                "limitAmount must be greater than 0, got {}",
                new_budget.limit_amount
            ))
            .into());
        }
        Self::validate_period(new_budget.month, new_budget.year)
    }

    /// Loads the category and checks the caller may budget against it.
    fn load_usable_category(&self, category_id: &str, user_id: &str) -> Result<Category> {
        let category = self
            .category_repository
            .get_by_id(category_id)?
            .ok_or_else(|| Error::not_found("Category", "id", category_id))?;
        if !category.is_usable_by(user_id) {
            return Err(Error::Unauthorized(
                "You can only create budgets for your own categories or default categories"
                    .to_string(),
            ));
        }
        Ok(category)
    }

    /// Loads a budget and verifies the caller owns it.
    fn load_owned(&self, id: &str, user_id: &str, action: &str) -> Result<Budget> {
        let budget = self
            .budget_repository
            .get_by_id(id)?
            .ok_or_else(|| Error::not_found("Budget", "id", id))?;
        if budget.user_id != user_id {
            return Err(Error::Unauthorized(format!(
                "You can only {} your own budgets",
                action
            )));
        }
        Ok(budget)
    }

    fn duplicate_budget(category_name: &str, month: u32, year: i32) -> Error {
        Error::Duplicate(format!(
            "Budget already exists for category '{}' in {}/{}",
            category_name, month, year
        ))
    }

    /// Pre-checks the (user, category, month, year) uniqueness. `exclude_id`
    /// lets an update keep its own slot.
    fn check_duplicate(
        &self,
        user_id: &str,
        category: &Category,
        month: u32,
        year: i32,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let existing = self
            .budget_repository
            .find_by_user_category_month_year(user_id, &category.id, month, year)?;
        if let Some(existing) = existing {
            if exclude_id != Some(existing.id.as_str()) {
                return Err(Self::duplicate_budget(&category.name, month, year));
            }
        }
        Ok(())
    }

    /// The pre-check races with concurrent writers; when the store's
    /// constraint fires instead, surface the same error the pre-check would.
    fn remap_unique_violation(err: Error, category_name: &str, month: u32, year: i32) -> Error {
        match err {
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                Self::duplicate_budget(category_name, month, year)
            }
            other => other,
        }
    }

    fn evaluate(&self, budget: &Budget) -> Result<BudgetEvaluation> {
        let (window_start, window_end) = month_period(budget.month, budget.year)?;
        let spending = self.spending_service.category_spending(
            &budget.user_id,
            &budget.category_id,
            window_start,
            window_end,
        )?;
        Ok(BudgetEvaluation {
            spending,
            percentage_used: percentage_used(spending, budget.limit_amount)?,
            remaining: budget.limit_amount - spending,
            exceeded: spending > budget.limit_amount,
            budget: budget.clone(),
        })
    }

    fn to_summary(&self, evaluation: BudgetEvaluation) -> Result<BudgetSummary> {
        let category = self
            .category_repository
            .get_by_id(&evaluation.budget.category_id)?
            .ok_or_else(|| {
                Error::not_found("Category", "id", evaluation.budget.category_id.clone())
            })?;
        Ok(BudgetSummary {
            id: evaluation.budget.id,
            category_id: evaluation.budget.category_id,
            category_name: category.name,
            limit_amount: evaluation.budget.limit_amount,
            current_spending: evaluation.spending,
            month: evaluation.budget.month,
            year: evaluation.budget.year,
            percentage_used: evaluation.percentage_used.to_f64().unwrap_or(0.0),
            is_exceeded: evaluation.exceeded,
            remaining: evaluation.remaining,
            created_at: evaluation.budget.created_at,
        })
    }

    fn evaluate_to_summary(&self, budget: &Budget) -> Result<BudgetSummary> {
        let evaluation = self.evaluate(budget)?;
        self.to_summary(evaluation)
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<BudgetSummary> {
        Self::validate(&new_budget)?;
        let category = self.load_usable_category(&new_budget.category_id, user_id)?;
        self.check_duplicate(user_id, &category, new_budget.month, new_budget.year, None)?;

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category_id: new_budget.category_id,
            limit_amount: new_budget.limit_amount,
            month: new_budget.month,
            year: new_budget.year,
            created_at: self.clock.now(),
        };

        debug!(
            "Creating budget for category '{}' in {}/{}",
            category.name, budget.month, budget.year
        );
        let saved = self.budget_repository.create(budget).await.map_err(|e| {
            Self::remap_unique_violation(e, &category.name, new_budget.month, new_budget.year)
        })?;
        info!("Created budget {}", saved.id);

        self.evaluate_to_summary(&saved)
    }

    async fn update_budget(
        &self,
        id: &str,
        user_id: &str,
        update: NewBudget,
    ) -> Result<BudgetSummary> {
        Self::validate(&update)?;
        let existing = self.load_owned(id, user_id, "update")?;
        let category = self.load_usable_category(&update.category_id, user_id)?;

        // Re-check uniqueness only when the key tuple actually changes, so
        // a limit-only update on the current slot never trips over itself.
        let key_changed = existing.category_id != update.category_id
            || existing.month != update.month
            || existing.year != update.year;
        if key_changed {
            self.check_duplicate(user_id, &category, update.month, update.year, Some(id))?;
        }

        let budget = Budget {
            category_id: update.category_id,
            limit_amount: update.limit_amount,
            month: update.month,
            year: update.year,
            ..existing
        };

        let saved = self.budget_repository.update(budget).await.map_err(|e| {
            Self::remap_unique_violation(e, &category.name, update.month, update.year)
        })?;
        info!("Updated budget {}", saved.id);

        self.evaluate_to_summary(&saved)
    }

    async fn delete_budget(&self, id: &str, user_id: &str) -> Result<()> {
        self.load_owned(id, user_id, "delete")?;
        self.budget_repository.delete(id).await?;
        info!("Deleted budget {}", id);
        Ok(())
    }

    fn get_budget(&self, id: &str, user_id: &str) -> Result<BudgetSummary> {
        let budget = self.load_owned(id, user_id, "view")?;
        self.evaluate_to_summary(&budget)
    }

    fn list_budgets(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<BudgetSummary>> {
        Self::validate_period(month, year)?;
        let budgets = self
            .budget_repository
            .find_by_user_and_month_year(user_id, month, year)?;
        budgets
            .iter()
            .map(|b| self.evaluate_to_summary(b))
            .collect()
    }

    fn get_budget_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>> {
        let today = self.clock.today();
        let budgets = self.budget_repository.find_by_user_and_month_year(
            user_id,
            today.month(),
            today.year(),
        )?;

        let mut alerts = Vec::new();
        for budget in budgets {
            let evaluation = self.evaluate(&budget)?;
            let Some(classification) = classify(&evaluation, today)? else {
                continue;
            };
            let forecast = estimate(&evaluation, today)?;
            let category = self
                .category_repository
                .get_by_id(&budget.category_id)?
                .ok_or_else(|| Error::not_found("Category", "id", budget.category_id.clone()))?;

            alerts.push(BudgetAlert {
                budget_id: evaluation.budget.id,
                category_name: category.name,
                limit_amount: evaluation.budget.limit_amount,
                current_spending: evaluation.spending,
                percentage_used: evaluation.percentage_used.to_f64().unwrap_or(0.0),
                days_left_in_month: classification.days_left_in_month,
                alert_level: classification.level,
                message: classification.message,
                forecast,
            });
        }
        debug!(
            "{} of the current month's budgets are at alert level",
            alerts.len()
        );
        Ok(alerts)
    }
}
