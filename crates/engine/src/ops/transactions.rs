//! Transaction posting and history queries.
//!
//! Posting is the hot path: it is the only writer of account balances and
//! runs as a single database transaction, so a failure at any step leaves no
//! partial rows behind.

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveValue::Set, Condition, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, PostTransactionCmd, ResultEngine, accounts, categories, transaction_categories,
    transactions::{self, HistoryEntry, Transaction},
};

use super::{Engine, normalize_required_text, with_tx};

/// Maximum rows returned by any single history query.
pub const HISTORY_LIMIT: u64 = 1000;

impl Engine {
    /// Post a transaction against one of the user's accounts and move the
    /// account balance by the signed amount.
    ///
    /// Every supplied category must exist ([`InvalidArgument`] otherwise);
    /// duplicate ids are tolerated and linked once. The ledger row, its
    /// category links and the balance update commit together or not at all.
    /// The balance moves via an in-place increment, so concurrent postings
    /// against the same account all land.
    ///
    /// [`InvalidArgument`]: EngineError::InvalidArgument
    pub async fn post_transaction(&self, cmd: PostTransactionCmd) -> ResultEngine<Transaction> {
        let description = normalize_required_text(&cmd.description, "description")?;
        if cmd.amount == 0 {
            return Err(EngineError::InvalidArgument(
                "amount must be non-zero".to_string(),
            ));
        }
        if cmd.category_ids.is_empty() {
            return Err(EngineError::InvalidArgument(
                "at least one category is required".to_string(),
            ));
        }
        let mut category_ids = cmd.category_ids.clone();
        category_ids.sort_unstable();
        category_ids.dedup();

        // The write transaction must open with the balance update (its
        // first statement takes SQLite's write lock), so all checks run on
        // the pool connection before it begins.
        self.require_account_owned(&self.database, cmd.user_id, cmd.account_id)
            .await?;
        let resolved = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids.clone()))
            .count(&self.database)
            .await?;
        if resolved != category_ids.len() as u64 {
            return Err(EngineError::InvalidArgument(
                "category not supported".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.apply_balance_delta(&db_tx, cmd.account_id, cmd.amount)
                .await?;

            let entry = transactions::ActiveModel {
                account_id: Set(cmd.account_id),
                amount: Set(cmd.amount),
                transaction_date: Set(Utc::now()),
                description: Set(description),
                ..Default::default()
            };
            let inserted = entry.insert(&db_tx).await?;

            let links =
                category_ids
                    .iter()
                    .map(|category_id| transaction_categories::ActiveModel {
                        transaction_id: Set(inserted.id),
                        category_id: Set(*category_id),
                    });
            transaction_categories::Entity::insert_many(links)
                .exec(&db_tx)
                .await?;

            Ok(Transaction::from_model(inserted, category_ids))
        })
    }

    /// The user's transactions with a date inside `[start, end]`, both ends
    /// inclusive.
    pub async fn history_between(
        &self,
        user_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<HistoryEntry>> {
        if start > end {
            return Err(EngineError::InvalidArgument(
                "start date must be on or before end date".to_string(),
            ));
        }
        let from = start.and_time(NaiveTime::MIN).and_utc();
        let until = end
            .succ_opt()
            .ok_or_else(|| EngineError::InvalidArgument("end date out of range".to_string()))?
            .and_time(NaiveTime::MIN)
            .and_utc();

        self.history(
            user_id,
            Some(
                Condition::all()
                    .add(transactions::Column::TransactionDate.gte(from))
                    .add(transactions::Column::TransactionDate.lt(until)),
            ),
        )
        .await
    }

    /// The user's transactions on accounts of exactly the given type.
    /// The match is case-sensitive: "Cash" and "cash" are different types.
    pub async fn history_by_account_type(
        &self,
        user_id: i32,
        account_type: &str,
    ) -> ResultEngine<Vec<HistoryEntry>> {
        self.history(
            user_id,
            Some(Condition::all().add(accounts::Column::AccountType.eq(account_type))),
        )
        .await
    }

    /// Every transaction on the user's accounts, capped at [`HISTORY_LIMIT`]
    /// rows.
    pub async fn all_history(&self, user_id: i32) -> ResultEngine<Vec<HistoryEntry>> {
        self.history(user_id, None).await
    }

    /// Shared history query: join each transaction with its account, scope
    /// to the caller, load the category sets, order by (date, id) ascending.
    async fn history(
        &self,
        user_id: i32,
        filter: Option<Condition>,
    ) -> ResultEngine<Vec<HistoryEntry>> {
        let mut query = transactions::Entity::find()
            .find_also_related(accounts::Entity)
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(transactions::Column::TransactionDate)
            .order_by_asc(transactions::Column::Id)
            .limit(HISTORY_LIMIT);
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        let rows = query.all(&self.database).await?;

        let entries: Vec<transactions::Model> =
            rows.iter().map(|(entry, _)| entry.clone()).collect();
        let category_sets = entries
            .load_many_to_many(
                categories::Entity,
                transaction_categories::Entity,
                &self.database,
            )
            .await?;

        let mut history = Vec::with_capacity(rows.len());
        for ((transaction, account), categories) in rows.into_iter().zip(category_sets) {
            // The account FK cascades, so the join cannot miss.
            let account =
                account.ok_or_else(|| EngineError::KeyNotFound("account".to_string()))?;
            history.push(HistoryEntry {
                transaction,
                account,
                categories,
            });
        }
        Ok(history)
    }
}
