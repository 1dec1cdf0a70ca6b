//! Ownership and existence checks shared by the ops.
//!
//! Lookups scoped to a user treat rows owned by someone else exactly like
//! missing rows, so callers cannot probe for foreign ids.

use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, accounts, budgets, categories, users};

use super::Engine;

/// Generates a by-id lookup that only sees rows owned by the given user.
macro_rules! impl_require_owned {
    ($require_fn:ident, $module:ident, $label:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            user_id: i32,
            target_id: i32,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(target_id)
                .filter($module::Column::UserId.eq(user_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($label.to_string()))
        }
    };
}

impl Engine {
    impl_require_owned!(require_account_owned, accounts, "account");
    impl_require_owned!(require_budget_owned, budgets, "budget");

    pub(super) async fn require_user_exists<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(user_id).one(db).await?.is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user".to_string()));
        }
        Ok(())
    }

    pub(super) async fn require_category_exists<C: ConnectionTrait>(
        &self,
        db: &C,
        category_id: i32,
    ) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category".to_string()))
    }
}
