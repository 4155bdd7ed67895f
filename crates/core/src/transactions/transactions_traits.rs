use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilter};

/// Trait for transaction repository operations.
///
/// `find_by_user_and_date_range` is the transaction source consumed by the
/// spending aggregation; both bounds are inclusive and no ordering is
/// guaranteed.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, id: &str) -> Result<Option<Transaction>>;
    fn find_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
    fn find_by_user_and_date_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>>;
    fn find_by_user_and_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Vec<Transaction>>;
    async fn create(&self, transaction: Transaction) -> Result<Transaction>;
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        id: &str,
        user_id: &str,
        update: NewTransaction,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str, user_id: &str) -> Result<()>;
    fn get_transaction(&self, id: &str, user_id: &str) -> Result<Transaction>;
    fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
}
