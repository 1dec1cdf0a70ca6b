//! Budget operations.

use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    BudgetCmd, EngineError, ResultEngine, accounts,
    budgets::{self, Budget, BudgetOverview, BudgetScope},
    categories,
};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Create a budget for the user. The category must exist and an
    /// account-scoped budget must name one of the user's own accounts.
    pub async fn create_budget(&self, cmd: BudgetCmd) -> ResultEngine<Budget> {
        let scope = self.normalize_scope(cmd.scope)?;

        with_tx!(self, |db_tx| {
            self.require_category_exists(&db_tx, cmd.category_id)
                .await?;
            self.require_scope_account(&db_tx, cmd.user_id, &scope)
                .await?;

            let (account_id, account_type) = scope.into_columns();
            let budget = budgets::ActiveModel {
                user_id: Set(cmd.user_id),
                category_id: Set(cmd.category_id),
                account_id: Set(account_id),
                account_type: Set(account_type),
                amount: Set(cmd.amount),
                ..Default::default()
            };
            Budget::try_from(budget.insert(&db_tx).await?)
        })
    }

    /// List the user's budgets with their categories and, for account-scoped
    /// ones, the account.
    pub async fn list_budgets(&self, user_id: i32) -> ResultEngine<Vec<BudgetOverview>> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_asc(budgets::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        let account_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(budget, _)| budget.account_id)
            .collect();
        let accounts_by_id: HashMap<i32, accounts::Model> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let mut overviews = Vec::with_capacity(rows.len());
        for (model, category) in rows {
            // The category FK cascades, so the join can only miss mid-delete.
            let category = category
                .ok_or_else(|| EngineError::KeyNotFound("category".to_string()))?;
            let account = model
                .account_id
                .and_then(|id| accounts_by_id.get(&id).cloned());
            overviews.push(BudgetOverview {
                budget: Budget::try_from(model)?,
                category,
                account,
            });
        }
        Ok(overviews)
    }

    /// Replace a budget's category, amount and scope.
    pub async fn update_budget(&self, budget_id: i32, cmd: BudgetCmd) -> ResultEngine<Budget> {
        let scope = self.normalize_scope(cmd.scope)?;

        with_tx!(self, |db_tx| {
            let model = self
                .require_budget_owned(&db_tx, cmd.user_id, budget_id)
                .await?;
            self.require_category_exists(&db_tx, cmd.category_id)
                .await?;
            self.require_scope_account(&db_tx, cmd.user_id, &scope)
                .await?;

            let (account_id, account_type) = scope.into_columns();
            let mut budget: budgets::ActiveModel = model.into();
            budget.category_id = Set(cmd.category_id);
            budget.account_id = Set(account_id);
            budget.account_type = Set(account_type);
            budget.amount = Set(cmd.amount);
            Budget::try_from(budget.update(&db_tx).await?)
        })
    }

    /// Delete a budget the user owns and return the removed row.
    pub async fn delete_budget(&self, user_id: i32, budget_id: i32) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_budget_owned(&db_tx, user_id, budget_id)
                .await?;
            budgets::Entity::delete_by_id(budget_id)
                .exec(&db_tx)
                .await?;
            Budget::try_from(model)
        })
    }

    fn normalize_scope(&self, scope: BudgetScope) -> ResultEngine<BudgetScope> {
        match scope {
            BudgetScope::Account(id) => Ok(BudgetScope::Account(id)),
            BudgetScope::AccountType(kind) => Ok(BudgetScope::AccountType(
                normalize_required_text(&kind, "account type")?,
            )),
        }
    }

    async fn require_scope_account<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        scope: &BudgetScope,
    ) -> ResultEngine<()> {
        if let BudgetScope::Account(account_id) = scope {
            self.require_account_owned(db, user_id, *account_id).await?;
        }
        Ok(())
    }
}
