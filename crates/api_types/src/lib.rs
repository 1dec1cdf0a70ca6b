//! Wire types shared by the server and its clients.
//!
//! Field names follow the JSON API (camelCase). Every response body carries
//! a human-readable `message`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain acknowledgement body, used by deletes and registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned on every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub token: String,
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountNew {
        pub account_type: String,
        /// Opening balance in minor units; zero when absent.
        pub balance: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountGet {
        pub id: i32,
        pub user_id: i32,
        pub account_type: String,
        pub balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountCreated {
        pub message: String,
        pub account: AccountGet,
    }

    /// The `account` field holds the full list.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountList {
        pub message: String,
        pub account: Vec<AccountGet>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryNew {
        pub name: String,
        pub parent_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryGet {
        pub id: i32,
        pub name: String,
        pub parent_id: Option<i32>,
    }

    /// A root category with its direct children.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryNodeGet {
        pub id: i32,
        pub name: String,
        pub parent_id: Option<i32>,
        pub children: Vec<CategoryGet>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreated {
        pub message: String,
        pub category: CategoryGet,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryList {
        pub message: String,
        pub categories: Vec<CategoryNodeGet>,
    }
}

pub mod budget {
    use super::*;

    /// Exactly one of `account_id` / `account_type` scopes the budget; when
    /// both are sent the account id wins.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub category_id: i32,
        pub amount: i64,
        pub account_id: Option<i32>,
        pub account_type: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetGet {
        pub id: i32,
        pub user_id: i32,
        pub category_id: i32,
        pub amount: i64,
        pub account_id: Option<i32>,
        pub account_type: Option<String>,
    }

    /// A budget joined with its category and, when account-scoped, the
    /// account.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetOverviewGet {
        pub id: i32,
        pub user_id: i32,
        pub category_id: i32,
        pub amount: i64,
        pub account_id: Option<i32>,
        pub account_type: Option<String>,
        pub category: category::CategoryGet,
        pub account: Option<account::AccountGet>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreated {
        pub message: String,
        pub budget: BudgetGet,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetList {
        pub message: String,
        pub budgets: Vec<BudgetOverviewGet>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        pub account_id: i32,
        /// Signed amount in minor units; negative spends, positive deposits.
        pub amount: i64,
        pub category_ids: Vec<i32>,
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionGet {
        pub id: i32,
        pub account_id: i32,
        pub amount: i64,
        /// RFC3339 timestamp assigned by the server at posting time.
        pub transaction_date: DateTime<Utc>,
        pub description: String,
        pub category_ids: Vec<i32>,
    }

    /// A ledger entry joined with its account and categories.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HistoryEntryGet {
        pub id: i32,
        pub account_id: i32,
        pub amount: i64,
        pub transaction_date: DateTime<Utc>,
        pub description: String,
        pub account: account::AccountGet,
        pub categories: Vec<category::CategoryGet>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub message: String,
        pub status: u16,
        pub data: TransactionGet,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryReport {
        pub message: String,
        pub status: u16,
        pub datum: Vec<HistoryEntryGet>,
    }
}
