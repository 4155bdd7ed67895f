use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::ClockTrait;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};

/// Service for managing transactions.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    clock: Arc<dyn ClockTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        clock: Arc<dyn ClockTrait>,
    ) -> Self {
        TransactionService {
            transaction_repository,
            category_repository,
            clock,
        }
    }

    fn validate(new_transaction: &NewTransaction) -> Result<()> {
        if !new_transaction.amount.is_positive() {
            return Err(ValidationError::InvalidInput(format!(
                "amount must be greater than 0, got {}",
                new_transaction.amount
            ))
            .into());
        }
        Ok(())
    }

    /// Category must exist and be either shared or owned by the caller.
    fn ensure_category_usable(&self, category_id: &str, user_id: &str) -> Result<()> {
        let category = self
            .category_repository
            .get_by_id(category_id)?
            .ok_or_else(|| Error::not_found("Category", "id", category_id))?;
        if !category.is_usable_by(user_id) {
            return Err(Error::Unauthorized(
                "You can only use your own categories or default categories".to_string(),
            ));
        }
        Ok(())
    }

    fn load_owned(&self, id: &str, user_id: &str, action: &str) -> Result<Transaction> {
        let transaction = self
            .transaction_repository
            .get_by_id(id)?
            .ok_or_else(|| Error::not_found("Transaction", "id", id))?;
        if transaction.user_id != user_id {
            return Err(Error::Unauthorized(format!(
                "You can only {} your own transactions",
                action
            )));
        }
        Ok(transaction)
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        Self::validate(&new_transaction)?;
        self.ensure_category_usable(&new_transaction.category_id, user_id)?;

        let now = self.clock.now();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category_id: new_transaction.category_id,
            amount: new_transaction.amount,
            description: new_transaction.description,
            transaction_date: new_transaction.transaction_date,
            payment_method: new_transaction.payment_method,
            transaction_type: new_transaction.transaction_type,
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Creating {} transaction of {} for user {}",
            transaction.transaction_type, transaction.amount, user_id
        );
        self.transaction_repository.create(transaction).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        user_id: &str,
        update: NewTransaction,
    ) -> Result<Transaction> {
        Self::validate(&update)?;
        let existing = self.load_owned(id, user_id, "update")?;
        self.ensure_category_usable(&update.category_id, user_id)?;

        let updated = Transaction {
            category_id: update.category_id,
            amount: update.amount,
            description: update.description,
            transaction_date: update.transaction_date,
            payment_method: update.payment_method,
            transaction_type: update.transaction_type,
            updated_at: self.clock.now(),
            ..existing
        };
        self.transaction_repository.update(updated).await
    }

    async fn delete_transaction(&self, id: &str, user_id: &str) -> Result<()> {
        self.load_owned(id, user_id, "delete")?;
        self.transaction_repository.delete(id).await
    }

    fn get_transaction(&self, id: &str, user_id: &str) -> Result<Transaction> {
        self.load_owned(id, user_id, "view")
    }

    fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = match (filter.start_date, filter.end_date) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(ValidationError::InvalidInput(format!(
                        "startDate {} is after endDate {}",
                        start, end
                    ))
                    .into());
                }
                self.transaction_repository
                    .find_by_user_and_date_range(user_id, start, end)?
            }
            _ => match &filter.category_id {
                Some(category_id) => self
                    .transaction_repository
                    .find_by_user_and_category(user_id, category_id)?,
                None => self.transaction_repository.find_by_user(user_id)?,
            },
        };

        if let Some(category_id) = &filter.category_id {
            transactions.retain(|t| &t.category_id == category_id);
        }
        transactions.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use crate::money::MoneyAmount;
    use crate::transactions::transactions_model::TransactionType;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::RwLock;

    struct MockTransactionRepository {
        transactions: RwLock<Vec<Transaction>>,
    }

    impl MockTransactionRepository {
        fn new() -> Self {
            Self {
                transactions: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn get_by_id(&self, id: &str) -> Result<Option<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        fn find_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect())
        }

        fn find_by_user_and_date_range(
            &self,
            user_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .filter(|t| {
                    t.user_id == user_id
                        && t.transaction_date >= start
                        && t.transaction_date <= end
                })
                .cloned()
                .collect())
        }

        fn find_by_user_and_category(
            &self,
            user_id: &str,
            category_id: &str,
        ) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id && t.category_id == category_id)
                .cloned()
                .collect())
        }

        async fn create(&self, transaction: Transaction) -> Result<Transaction> {
            self.transactions.write().unwrap().push(transaction.clone());
            Ok(transaction)
        }

        async fn update(&self, transaction: Transaction) -> Result<Transaction> {
            let mut transactions = self.transactions.write().unwrap();
            let slot = transactions
                .iter_mut()
                .find(|t| t.id == transaction.id)
                .expect("transaction exists");
            *slot = transaction.clone();
            Ok(transaction)
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.transactions.write().unwrap().retain(|t| t.id != id);
            Ok(())
        }
    }

    struct MockCategoryRepository {
        categories: Vec<Category>,
    }

    #[async_trait]
    impl CategoryRepositoryTrait for MockCategoryRepository {
        fn get_by_id(&self, id: &str) -> Result<Option<Category>> {
            Ok(self.categories.iter().find(|c| c.id == id).cloned())
        }
        fn find_defaults(&self) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.is_default)
                .cloned()
                .collect())
        }
        fn find_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.user_id.as_deref() == Some(user_id))
                .cloned()
                .collect())
        }
        async fn create(&self, _category: Category) -> Result<Category> {
            unimplemented!()
        }
        async fn create_many(&self, _categories: Vec<Category>) -> Result<usize> {
            unimplemented!()
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl ClockTrait for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn category(id: &str, user_id: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            name: format!("cat-{}", id),
            category_type: TransactionType::Expense,
            is_default: user_id.is_none(),
            user_id: user_id.map(|u| u.to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn make_service(categories: Vec<Category>) -> TransactionService {
        TransactionService::new(
            Arc::new(MockTransactionRepository::new()),
            Arc::new(MockCategoryRepository { categories }),
            Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap(),
            )),
        )
    }

    fn new_transaction(category_id: &str, cents: i64) -> NewTransaction {
        NewTransaction {
            category_id: category_id.to_string(),
            amount: MoneyAmount::from_cents(cents),
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            payment_method: None,
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn test_create_with_default_category() {
        let service = make_service(vec![category("food", None)]);
        let created = service
            .create_transaction("u1", new_transaction("food", 150000))
            .await
            .unwrap();
        assert_eq!(created.user_id, "u1");
        assert_eq!(created.amount, MoneyAmount::from_cents(150000));
    }

    #[tokio::test]
    async fn test_create_with_foreign_category_unauthorized() {
        let service = make_service(vec![category("private", Some("u2"))]);
        let result = service
            .create_transaction("u1", new_transaction("private", 100))
            .await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_category_not_found() {
        let service = make_service(vec![]);
        let result = service
            .create_transaction("u1", new_transaction("nope", 100))
            .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount() {
        let service = make_service(vec![category("food", None)]);
        let result = service
            .create_transaction("u1", new_transaction("food", 0))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_enforce_ownership() {
        let service = make_service(vec![category("food", None)]);
        let created = service
            .create_transaction("u1", new_transaction("food", 100))
            .await
            .unwrap();

        let result = service
            .update_transaction(&created.id, "intruder", new_transaction("food", 200))
            .await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));

        let result = service.delete_transaction(&created.id, "intruder").await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));

        service
            .delete_transaction(&created.id, "u1")
            .await
            .unwrap();
        assert!(matches!(
            service.get_transaction(&created.id, "u1"),
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_with_date_range_and_category_filter() {
        let service = make_service(vec![category("food", None), category("transport", None)]);
        let mut t1 = new_transaction("food", 100);
        t1.transaction_date = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        let mut t2 = new_transaction("transport", 200);
        t2.transaction_date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        let mut t3 = new_transaction("food", 300);
        t3.transaction_date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();

        for t in [t1, t2, t3] {
            service.create_transaction("u1", t).await.unwrap();
        }

        let filter = TransactionFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 10, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 31),
            category_id: Some("food".to_string()),
        };
        let listed = service.list_transactions("u1", &filter).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, MoneyAmount::from_cents(100));
    }

    #[tokio::test]
    async fn test_list_rejects_inverted_date_range() {
        let service = make_service(vec![]);
        let filter = TransactionFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 10, 31),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 1),
            category_id: None,
        };
        assert!(matches!(
            service.list_transactions("u1", &filter),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first() {
        let service = make_service(vec![category("food", None)]);
        let mut older = new_transaction("food", 100);
        older.transaction_date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let mut newer = new_transaction("food", 200);
        newer.transaction_date = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        service.create_transaction("u1", older).await.unwrap();
        service.create_transaction("u1", newer).await.unwrap();

        let listed = service
            .list_transactions("u1", &TransactionFilter::default())
            .unwrap();
        assert_eq!(listed[0].amount, MoneyAmount::from_cents(200));
        assert_eq!(listed[1].amount, MoneyAmount::from_cents(100));
    }
}
