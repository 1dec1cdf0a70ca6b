//! Category API endpoints. The category tree is global, not per user.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use api_types::category::{CategoryCreated, CategoryGet, CategoryList, CategoryNew, CategoryNodeGet};
use engine::{CategoryNode, categories};

use crate::{ServerError, auth::AuthUser, server::ServerState};

pub(crate) fn to_get(model: categories::Model) -> CategoryGet {
    CategoryGet {
        id: model.id,
        name: model.name,
        parent_id: model.parent_id,
    }
}

fn to_node_get(node: CategoryNode) -> CategoryNodeGet {
    CategoryNodeGet {
        id: node.category.id,
        name: node.category.name,
        parent_id: node.category.parent_id,
        children: node.children.into_iter().map(to_get).collect(),
    }
}

pub async fn create(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
    payload: Result<Json<CategoryNew>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryCreated>), ServerError> {
    let Json(payload) = payload?;
    let category = state
        .engine
        .create_category(&payload.name, payload.parent_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryCreated {
            message: "Category created successfully.".to_string(),
            category: to_get(category),
        }),
    ))
}

pub async fn list(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryList>, ServerError> {
    let nodes = state.engine.list_categories().await?;

    Ok(Json(CategoryList {
        message: "Categories retrieved successfully.".to_string(),
        categories: nodes.into_iter().map(to_node_get).collect(),
    }))
}

pub async fn update(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(category_id): Path<i32>,
    payload: Result<Json<CategoryNew>, JsonRejection>,
) -> Result<Json<CategoryCreated>, ServerError> {
    let Json(payload) = payload?;
    let category = state
        .engine
        .update_category(category_id, &payload.name, payload.parent_id)
        .await?;

    Ok(Json(CategoryCreated {
        message: "Category updated successfully.".to_string(),
        category: to_get(category),
    }))
}

pub async fn remove(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(category_id): Path<i32>,
) -> Result<Json<CategoryCreated>, ServerError> {
    let category = state.engine.delete_category(category_id).await?;

    Ok(Json(CategoryCreated {
        message: "Category deleted successfully.".to_string(),
        category: to_get(category),
    }))
}
