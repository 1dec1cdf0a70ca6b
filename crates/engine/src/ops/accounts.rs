//! Account ledger operations.

use sea_orm::{
    ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{EngineError, ResultEngine, accounts};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Open a new account for a user. The balance starts at zero unless an
    /// opening balance is given.
    pub async fn create_account(
        &self,
        user_id: i32,
        account_type: &str,
        initial_balance: Option<i64>,
    ) -> ResultEngine<accounts::Model> {
        let account_type = normalize_required_text(account_type, "account type")?;

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;

            let account = accounts::ActiveModel {
                user_id: Set(user_id),
                account_type: Set(account_type),
                balance: Set(initial_balance.unwrap_or(0)),
                ..Default::default()
            };
            Ok(account.insert(&db_tx).await?)
        })
    }

    /// List the user's accounts, oldest first.
    pub async fn list_accounts(&self, user_id: i32) -> ResultEngine<Vec<accounts::Model>> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?)
    }

    /// Delete an account the user owns.
    ///
    /// Deletion is deliberate about history: the schema cascades, so the
    /// account's transactions and their category links go with it, and a
    /// non-zero balance does not block. A missing or foreign id is an error.
    pub async fn delete_account(&self, user_id: i32, account_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_account_owned(&db_tx, user_id, account_id)
                .await?;
            accounts::Entity::delete_by_id(account_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Move an account's balance by `delta` in place. This is the only
    /// balance mutation in the engine; everything else reads.
    pub(super) async fn apply_balance_delta<C: ConnectionTrait>(
        &self,
        db: &C,
        account_id: i32,
        delta: i64,
    ) -> ResultEngine<()> {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(delta),
            )
            .filter(accounts::Column::Id.eq(account_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("account".to_string()));
        }
        Ok(())
    }
}
