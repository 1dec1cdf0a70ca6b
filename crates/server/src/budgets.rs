//! Budget API endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use api_types::budget::{BudgetCreated, BudgetGet, BudgetList, BudgetNew, BudgetOverviewGet};
use engine::{Budget, BudgetCmd, BudgetOverview, BudgetScope};

use crate::{ServerError, auth::AuthUser, server::ServerState};

fn to_get(budget: Budget) -> BudgetGet {
    let (account_id, account_type) = budget.scope.into_columns();
    BudgetGet {
        id: budget.id,
        user_id: budget.user_id,
        category_id: budget.category_id,
        amount: budget.amount,
        account_id,
        account_type,
    }
}

fn to_overview_get(overview: BudgetOverview) -> BudgetOverviewGet {
    let category = crate::categories::to_get(overview.category);
    let account = overview.account.map(crate::accounts::to_get);
    let (account_id, account_type) = overview.budget.scope.into_columns();
    BudgetOverviewGet {
        id: overview.budget.id,
        user_id: overview.budget.user_id,
        category_id: overview.budget.category_id,
        amount: overview.budget.amount,
        account_id,
        account_type,
        category,
        account,
    }
}

/// Pick the scope from the two optional fields. The account id wins when
/// both are sent; neither is a client error.
fn scope_from(
    account_id: Option<i32>,
    account_type: Option<String>,
) -> Result<BudgetScope, ServerError> {
    match (account_id, account_type) {
        (Some(id), _) => Ok(BudgetScope::Account(id)),
        (None, Some(kind)) => Ok(BudgetScope::AccountType(kind)),
        (None, None) => Err(ServerError::BadRequest(
            "Either accountId or accountType must be provided.".to_string(),
        )),
    }
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    payload: Result<Json<BudgetNew>, JsonRejection>,
) -> Result<(StatusCode, Json<BudgetCreated>), ServerError> {
    let Json(payload) = payload?;
    let scope = scope_from(payload.account_id, payload.account_type)?;
    let budget = state
        .engine
        .create_budget(BudgetCmd::new(
            user.id,
            payload.category_id,
            payload.amount,
            scope,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BudgetCreated {
            message: "Budget created successfully.".to_string(),
            budget: to_get(budget),
        }),
    ))
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetList>, ServerError> {
    let overviews = state.engine.list_budgets(user.id).await?;

    Ok(Json(BudgetList {
        message: "Budgets retrieved successfully.".to_string(),
        budgets: overviews.into_iter().map(to_overview_get).collect(),
    }))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(budget_id): Path<i32>,
    payload: Result<Json<BudgetNew>, JsonRejection>,
) -> Result<Json<BudgetCreated>, ServerError> {
    let Json(payload) = payload?;
    let scope = scope_from(payload.account_id, payload.account_type)?;
    let budget = state
        .engine
        .update_budget(
            budget_id,
            BudgetCmd::new(user.id, payload.category_id, payload.amount, scope),
        )
        .await?;

    Ok(Json(BudgetCreated {
        message: "Budget updated successfully.".to_string(),
        budget: to_get(budget),
    }))
}

pub async fn remove(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(budget_id): Path<i32>,
) -> Result<Json<BudgetCreated>, ServerError> {
    let budget = state.engine.delete_budget(user.id, budget_id).await?;

    Ok(Json(BudgetCreated {
        message: "Budget deleted successfully.".to_string(),
        budget: to_get(budget),
    }))
}
