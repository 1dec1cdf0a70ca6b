//! Transaction API endpoints: posting and the three history reports.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;

use api_types::transaction::{
    HistoryEntryGet, HistoryReport, TransactionCreated, TransactionGet, TransactionNew,
};
use engine::{HistoryEntry, PostTransactionCmd, Transaction};

use crate::{ServerError, auth::AuthUser, server::ServerState};

fn to_get(transaction: Transaction) -> TransactionGet {
    TransactionGet {
        id: transaction.id,
        account_id: transaction.account_id,
        amount: transaction.amount,
        transaction_date: transaction.transaction_date,
        description: transaction.description,
        category_ids: transaction.category_ids,
    }
}

fn to_entry_get(entry: HistoryEntry) -> HistoryEntryGet {
    HistoryEntryGet {
        id: entry.transaction.id,
        account_id: entry.transaction.account_id,
        amount: entry.transaction.amount,
        transaction_date: entry.transaction.transaction_date,
        description: entry.transaction.description,
        account: crate::accounts::to_get(entry.account),
        categories: entry
            .categories
            .into_iter()
            .map(crate::categories::to_get)
            .collect(),
    }
}

fn report_body(entries: Vec<HistoryEntry>) -> HistoryReport {
    HistoryReport {
        message: "Historical report generated successfully".to_string(),
        status: StatusCode::OK.as_u16(),
        datum: entries.into_iter().map(to_entry_get).collect(),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest("Invalid date format".to_string()))
}

/// Post a transaction and move the account balance in the same stroke.
pub async fn transact(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let Json(payload) = payload?;
    let cmd = PostTransactionCmd::new(user.id, payload.account_id, payload.amount)
        .categories(payload.category_ids)
        .description(payload.description);
    let transaction = state.engine.post_transaction(cmd).await?;

    Ok(Json(TransactionCreated {
        message: "Transaction created successfully".to_string(),
        status: StatusCode::OK.as_u16(),
        data: to_get(transaction),
    }))
}

/// Report over a closed date range; both path dates are `YYYY-MM-DD`.
pub async fn report(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path((date1, date2)): Path<(String, String)>,
) -> Result<Json<HistoryReport>, ServerError> {
    let start = parse_date(&date1)?;
    let end = parse_date(&date2)?;
    let entries = state.engine.history_between(user.id, start, end).await?;

    Ok(Json(report_body(entries)))
}

/// Report over the user's accounts of exactly the given type.
pub async fn account_report(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(account_type): Path<String>,
) -> Result<Json<HistoryReport>, ServerError> {
    let entries = state
        .engine
        .history_by_account_type(user.id, &account_type)
        .await?;

    Ok(Json(report_body(entries)))
}

/// Report over everything the user owns.
pub async fn whole_report(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<HistoryReport>, ServerError> {
    let entries = state.engine.all_history(user.id).await?;

    Ok(Json(report_body(entries)))
}
