use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::errors::Result;
use crate::money::MoneyAmount;
use crate::transactions::TransactionRepositoryTrait;

/// Trait defining the contract for the spending aggregation service.
pub trait SpendingServiceTrait: Send + Sync {
    /// Sums the caller's expense transactions for one category over an
    /// inclusive date window. Returns zero when nothing matches.
    fn category_spending(
        &self,
        user_id: &str,
        category_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MoneyAmount>;
}

/// Sums matching transactions into a period total.
///
/// One ranged repository call per invocation: the window is fetched whole
/// and filtered in memory, so evaluating several budgets for the same month
/// never multiplies the per-category round trips into range scans.
pub struct SpendingService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl SpendingService {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        SpendingService {
            transaction_repository,
        }
    }
}

impl SpendingServiceTrait for SpendingService {
    fn category_spending(
        &self,
        user_id: &str,
        category_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MoneyAmount> {
        debug!(
            "Summing expense transactions for category {} in [{}, {}]",
            category_id, start, end
        );

        let transactions = self
            .transaction_repository
            .find_by_user_and_date_range(user_id, start, end)?;

        // Income rows are always excluded, regardless of sign.
        let total: MoneyAmount = transactions
            .into_iter()
            .filter(|t| t.category_id == category_id)
            .filter(|t| t.transaction_type.is_expense())
            .map(|t| t.amount)
            .sum();

        Ok(total)
    }
}
