use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::transactions::TransactionType;
use crate::utils::ClockTrait;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};

const DEFAULT_INCOME_CATEGORIES: [&str; 5] =
    ["Salary", "Freelance", "Investment", "Gift", "Other Income"];

const DEFAULT_EXPENSE_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Groceries",
    "Rent",
    "Other Expense",
];

/// Service for managing categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
    clock: Arc<dyn ClockTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>, clock: Arc<dyn ClockTrait>) -> Self {
        CategoryService { repository, clock }
    }

    fn default_category(&self, name: &str, category_type: TransactionType) -> Category {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category_type,
            is_default: true,
            user_id: None,
            created_at: self.clock.now(),
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn seed_default_categories(&self) -> Result<usize> {
        let existing = self.repository.find_defaults()?;
        if !existing.is_empty() {
            debug!(
                "Default categories already initialized: {} found",
                existing.len()
            );
            return Ok(0);
        }

        let defaults: Vec<Category> = DEFAULT_INCOME_CATEGORIES
            .iter()
            .map(|name| self.default_category(name, TransactionType::Income))
            .chain(
                DEFAULT_EXPENSE_CATEGORIES
                    .iter()
                    .map(|name| self.default_category(name, TransactionType::Expense)),
            )
            .collect();

        let inserted = self.repository.create_many(defaults).await?;
        info!("Initialized {} default categories", inserted);
        Ok(inserted)
    }

    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        let user_categories = self.repository.find_by_user(user_id)?;
        let exists = user_categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&new_category.name));
        if exists {
            return Err(Error::Duplicate(format!(
                "You already have a category named '{}'",
                new_category.name
            )));
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: new_category.name,
            category_type: new_category.category_type,
            is_default: false,
            user_id: Some(user_id.to_string()),
            created_at: self.clock.now(),
        };
        self.repository.create(category).await
    }

    fn get_category(&self, id: &str) -> Result<Category> {
        self.repository
            .get_by_id(id)?
            .ok_or_else(|| Error::not_found("Category", "id", id))
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut categories = self.repository.find_defaults()?;
        categories.extend(self.repository.find_by_user(user_id)?);
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}
