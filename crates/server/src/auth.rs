//! Registration, login and the bearer-token gate.

use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use api_types::MessageResponse;
use api_types::user::{Credentials, TokenResponse, UserNew};
use engine::users;

use crate::{ServerError, server::ServerState};

/// Signing material for issued tokens, derived once from the secret.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    email: String,
    iat: usize,
    exp: usize,
}

/// The verified caller, inserted by [`require_auth`] for handlers to extract.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: i32,
}

fn encode_token(user: &users::Model, keys: &AuthKeys) -> Result<String, ServerError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|err| ServerError::Internal(format!("token encoding failed: {err}")))
}

fn bearer_token(request: &Request) -> Result<&str, ServerError> {
    let missing = || ServerError::Unauthorized("No authorization token provided.".to_string());

    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(missing)?;
    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(missing)
}

/// Middleware guarding every route past registration and login.
///
/// A missing token and an unverifiable one answer with distinct messages so
/// clients can tell a forgotten header from an expired session. The user row
/// is re-checked because a token can outlive its account.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let invalid = || ServerError::Unauthorized("Invalid or expired token.".to_string());

    let token = bearer_token(&request)?;
    let data = decode::<Claims>(token, &state.keys.decoding, &Validation::default())
        .map_err(|_| invalid())?;

    let user = state
        .engine
        .user_by_id(data.claims.sub)
        .await?
        .ok_or_else(invalid)?;

    request.extensions_mut().insert(AuthUser { id: user.id });
    Ok(next.run(request).await)
}

pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ServerError> {
    let Json(payload) = payload?;
    state
        .engine
        .register_user(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully.".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, ServerError> {
    let Json(payload) = payload?;
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }

    let user = state
        .engine
        .verify_credentials(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| ServerError::Unauthorized("invalid credentials".to_string()))?;
    let token = encode_token(&user, &state.keys)?;

    Ok(Json(TokenResponse { token }))
}
