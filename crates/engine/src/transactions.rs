//! Ledger entries.
//!
//! A `Transaction` is an append-only event against one account: posting it
//! is the only operation that moves the account balance. The date is stamped
//! by the server at insert time, never supplied by the caller.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{accounts, categories};

/// A committed ledger entry together with its linked category ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub amount: i64,
    pub transaction_date: DateTime<Utc>,
    pub description: String,
    pub category_ids: Vec<i32>,
}

impl Transaction {
    pub fn from_model(model: Model, category_ids: Vec<i32>) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            amount: model.amount,
            transaction_date: model.transaction_date,
            description: model.description,
            category_ids,
        }
    }
}

/// A ledger entry joined with its account and categories, as returned by the
/// history queries.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub transaction: Model,
    pub account: accounts::Model,
    pub categories: Vec<categories::Model>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: i32,
    pub amount: i64,
    pub transaction_date: DateTimeUtc,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::transaction_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::transaction_categories::Relation::Transaction
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
