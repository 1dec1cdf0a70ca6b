use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::ErrorResponse;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod accounts;
mod auth;
mod budgets;
mod categories;
mod server;
mod transactions;

pub mod types {
    pub mod user {
        pub use api_types::user::{Credentials, TokenResponse, UserNew};
    }

    pub mod account {
        pub use api_types::account::{AccountCreated, AccountGet, AccountList, AccountNew};
    }

    pub mod category {
        pub use api_types::category::{
            CategoryCreated, CategoryGet, CategoryList, CategoryNew, CategoryNodeGet,
        };
    }

    pub mod budget {
        pub use api_types::budget::{
            BudgetCreated, BudgetGet, BudgetList, BudgetNew, BudgetOverviewGet,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{
            HistoryEntryGet, HistoryReport, TransactionCreated, TransactionGet, TransactionNew,
        };
    }

    pub use api_types::{ErrorResponse, MessageResponse};
}

pub enum ServerError {
    Engine(EngineError),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ServerError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ServerError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                message,
                status: status.as_u16(),
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
