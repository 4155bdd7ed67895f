use async_trait::async_trait;

use crate::categories::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait for category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_by_id(&self, id: &str) -> Result<Option<Category>>;
    fn find_defaults(&self) -> Result<Vec<Category>>;
    fn find_by_user(&self, user_id: &str) -> Result<Vec<Category>>;
    async fn create(&self, category: Category) -> Result<Category>;
    async fn create_many(&self, categories: Vec<Category>) -> Result<usize>;
}

/// Trait for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Idempotent bootstrap seed of the shared default categories.
    async fn seed_default_categories(&self) -> Result<usize>;
    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;
    fn get_category(&self, id: &str) -> Result<Category>;
    /// Shared defaults plus the caller's own categories.
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
}
