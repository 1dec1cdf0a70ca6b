//! Account API endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use api_types::MessageResponse;
use api_types::account::{AccountCreated, AccountGet, AccountList, AccountNew};
use engine::accounts;

use crate::{ServerError, auth::AuthUser, server::ServerState};

pub(crate) fn to_get(model: accounts::Model) -> AccountGet {
    AccountGet {
        id: model.id,
        user_id: model.user_id,
        account_type: model.account_type,
        balance: model.balance,
    }
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    payload: Result<Json<AccountNew>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountCreated>), ServerError> {
    let Json(payload) = payload?;
    let account = state
        .engine
        .create_account(user.id, &payload.account_type, payload.balance)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountCreated {
            message: "Account created successfully.".to_string(),
            account: to_get(account),
        }),
    ))
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<AccountList>, ServerError> {
    let accounts = state.engine.list_accounts(user.id).await?;

    Ok(Json(AccountList {
        message: "Accounts retrieved successfully.".to_string(),
        account: accounts.into_iter().map(to_get).collect(),
    }))
}

pub async fn remove(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(account_id): Path<i32>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_account(user.id, account_id).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully.".to_string(),
    }))
}
