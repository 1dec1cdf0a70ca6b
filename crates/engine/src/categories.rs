//! Spending categories, shared by all users.
//!
//! `parent_id` forms a tree; root categories have no parent. Nothing stops a
//! cycle from being written through repeated re-parenting, callers that walk
//! the tree only ever descend one level.

use sea_orm::entity::prelude::*;

/// A root category with its direct children, as served by the listing.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryNode {
    pub category: Model,
    pub children: Vec<Model>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Parent,
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        super::transaction_categories::Relation::Transaction.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::transaction_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
