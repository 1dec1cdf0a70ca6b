//! Budget caps.
//!
//! A budget ties an amount to a category for one user and is scoped to
//! either a single account or an account type. The storage row keeps two
//! nullable columns; [`BudgetScope`] is the domain view where exactly one of
//! the two is present.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, accounts, categories};

/// Where a budget applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetScope {
    Account(i32),
    AccountType(String),
}

impl BudgetScope {
    /// Split into the `(account_id, account_type)` column pair.
    pub fn into_columns(self) -> (Option<i32>, Option<String>) {
        match self {
            Self::Account(id) => (Some(id), None),
            Self::AccountType(kind) => (None, Some(kind)),
        }
    }
}

/// A budget with its scope as a tagged value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub amount: i64,
    pub scope: BudgetScope,
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        // A row carrying both columns reads as account-scoped.
        let scope = match (model.account_id, model.account_type) {
            (Some(id), _) => BudgetScope::Account(id),
            (None, Some(kind)) => BudgetScope::AccountType(kind),
            (None, None) => {
                return Err(EngineError::InvalidArgument(
                    "budget has neither account nor account type".to_string(),
                ));
            }
        };
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            amount: model.amount,
            scope,
        })
    }
}

/// A budget joined with its category and, for account scopes, the account.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetOverview {
    pub budget: Budget,
    pub category: categories::Model,
    pub account: Option<accounts::Model>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub account_id: Option<i32>,
    pub account_type: Option<String>,
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
