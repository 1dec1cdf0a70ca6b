//! Command structs for engine operations.
//!
//! These types group parameters for write operations (posting transactions,
//! creating and replacing budgets), keeping call sites readable and avoiding
//! long argument lists.

use crate::budgets::BudgetScope;

/// Post a transaction against an account.
#[derive(Clone, Debug)]
pub struct PostTransactionCmd {
    pub user_id: i32,
    pub account_id: i32,
    pub amount: i64,
    pub category_ids: Vec<i32>,
    pub description: String,
}

impl PostTransactionCmd {
    #[must_use]
    pub fn new(user_id: i32, account_id: i32, amount: i64) -> Self {
        Self {
            user_id,
            account_id,
            amount,
            category_ids: Vec::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_ids.push(category_id);
        self
    }

    #[must_use]
    pub fn categories(mut self, category_ids: impl IntoIterator<Item = i32>) -> Self {
        self.category_ids.extend(category_ids);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Create a budget, or replace an existing one's fields wholesale.
#[derive(Clone, Debug)]
pub struct BudgetCmd {
    pub user_id: i32,
    pub category_id: i32,
    pub amount: i64,
    pub scope: BudgetScope,
}

impl BudgetCmd {
    #[must_use]
    pub fn new(user_id: i32, category_id: i32, amount: i64, scope: BudgetScope) -> Self {
        Self {
            user_id,
            category_id,
            amount,
            scope,
        }
    }
}
