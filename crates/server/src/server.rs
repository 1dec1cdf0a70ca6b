use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;
use std::time::Duration;

use crate::{accounts, auth, budgets, categories, transactions};
use api_types::ErrorResponse;
use engine::Engine;

/// Requests that outlive this deadline fail with 408 instead of hanging.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub keys: auth::AuthKeys,
}

async fn enforce_deadline(request: Request, next: Next) -> Response {
    match tokio::time::timeout(REQUEST_TIMEOUT, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            let status = StatusCode::REQUEST_TIMEOUT;
            (
                status,
                Json(ErrorResponse {
                    message: "request timed out".to_string(),
                    status: status.as_u16(),
                }),
            )
                .into_response()
        }
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/accounts", post(accounts::create).get(accounts::list))
        .route(
            "/accounts/{account_id}",
            axum::routing::delete(accounts::remove),
        )
        .route("/transact", post(transactions::transact))
        .route(
            "/transaction/{account_type}",
            get(transactions::account_report),
        )
        .route("/transaction/{date1}/{date2}", post(transactions::report))
        .route("/transactions", get(transactions::whole_report))
        .route("/budgets", post(budgets::create).get(budgets::list))
        .route(
            "/budgets/{budget_id}",
            axum::routing::put(budgets::update).delete(budgets::remove),
        )
        .route("/categories", post(categories::create).get(categories::list))
        .route(
            "/categories/{category_id}",
            axum::routing::put(categories::update).delete(categories::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .route("/user", post(auth::register))
        .route("/login", post(auth::login))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(enforce_deadline))
        .with_state(state)
}

/// Build the full application router. Exposed so tests can drive it without
/// binding a socket.
pub fn app(engine: Engine, token_secret: &str) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        keys: auth::AuthKeys::new(token_secret),
    };
    router(state)
}

pub async fn run(engine: Engine, token_secret: &str) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, token_secret, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    token_secret: &str,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, token_secret)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    token_secret: &str,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;
    let token_secret = token_secret.to_string();

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, &token_secret, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
