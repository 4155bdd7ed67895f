//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionType;

/// A transaction category.
///
/// Categories are either shared defaults (no owner, seeded at bootstrap) or
/// private to a single user. The budget evaluation logic never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub category_type: TransactionType,
    pub is_default: bool,
    /// `None` for shared/default categories.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// A category is usable by a caller iff it is shared or owned by them.
    pub fn is_usable_by(&self, user_id: &str) -> bool {
        match &self.user_id {
            None => true,
            Some(owner) => owner == user_id,
        }
    }
}

/// Input model for creating a custom category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub category_type: TransactionType,
}
