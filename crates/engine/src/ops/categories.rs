//! Category tree operations.
//!
//! Categories are global: every user reads and writes the same tree.

use std::collections::HashMap;

use sea_orm::{
    ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, ResultEngine,
    categories::{self, CategoryNode},
};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Create a category, optionally under an existing parent.
    pub async fn create_category(
        &self,
        name: &str,
        parent_id: Option<i32>,
    ) -> ResultEngine<categories::Model> {
        let name = normalize_required_text(name, "category name")?;

        with_tx!(self, |db_tx| {
            if let Some(parent_id) = parent_id {
                require_parent_exists(&db_tx, parent_id).await?;
            }

            let category = categories::ActiveModel {
                name: Set(name),
                parent_id: Set(parent_id),
                ..Default::default()
            };
            Ok(category.insert(&db_tx).await?)
        })
    }

    /// Rename a category and optionally move it under a new parent. Leaving
    /// `parent_id` out keeps the current parent; there is no un-parenting.
    pub async fn update_category(
        &self,
        category_id: i32,
        name: &str,
        parent_id: Option<i32>,
    ) -> ResultEngine<categories::Model> {
        let name = normalize_required_text(name, "category name")?;

        with_tx!(self, |db_tx| {
            let model = self.require_category_exists(&db_tx, category_id).await?;

            let mut category: categories::ActiveModel = model.into();
            category.name = Set(name);
            if let Some(parent_id) = parent_id {
                require_parent_exists(&db_tx, parent_id).await?;
                category.parent_id = Set(Some(parent_id));
            }
            Ok(category.update(&db_tx).await?)
        })
    }

    /// Delete a category and return the removed row. The schema promotes its
    /// children to roots (`parent_id` is set null) and drops its transaction
    /// links and budgets.
    pub async fn delete_category(&self, category_id: i32) -> ResultEngine<categories::Model> {
        with_tx!(self, |db_tx| {
            let model = self.require_category_exists(&db_tx, category_id).await?;
            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            Ok(model)
        })
    }

    /// List root categories, each with its direct children.
    pub async fn list_categories(&self) -> ResultEngine<Vec<CategoryNode>> {
        let roots = categories::Entity::find()
            .filter(categories::Column::ParentId.is_null())
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;

        let root_ids: Vec<i32> = roots.iter().map(|root| root.id).collect();
        let children = categories::Entity::find()
            .filter(categories::Column::ParentId.is_in(root_ids))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;

        let mut nodes: Vec<CategoryNode> = roots
            .into_iter()
            .map(|category| CategoryNode {
                category,
                children: Vec::new(),
            })
            .collect();
        let index: HashMap<i32, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.category.id, position))
            .collect();
        for child in children {
            if let Some(position) = child.parent_id.and_then(|id| index.get(&id)) {
                nodes[*position].children.push(child);
            }
        }
        Ok(nodes)
    }
}

async fn require_parent_exists<C: ConnectionTrait>(db: &C, parent_id: i32) -> ResultEngine<()> {
    let exists = categories::Entity::find_by_id(parent_id)
        .one(db)
        .await?
        .is_some();
    if !exists {
        return Err(EngineError::KeyNotFound("parent category".to_string()));
    }
    Ok(())
}
