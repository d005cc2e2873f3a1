//! Account Routes
//!
//! - POST /register - Create an account
//! - POST /login - Open a session (sets the `session` cookie)
//! - GET /logout - Close the session

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::models::{Credentials, MessageResponse};
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Read the session token from the `Cookie` header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

/// The logged-in user, if the request carries a live session
pub async fn session_user(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    state.users.session_user(&token).await
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

fn validate(credentials: &Credentials) -> ApiResult<()> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::Validation(
            "username and password are required".to_string(),
        ));
    }
    Ok(())
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    validate(&req)?;

    if !state.users.register(&req.username, &req.password).await {
        return Err(ApiError::Validation("User already exists".to_string()));
    }

    tracing::info!(username = %req.username, "Registered user");
    Ok((StatusCode::CREATED, message("User registered successfully")))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> ApiResult<impl IntoResponse> {
    let user_id = state
        .users
        .authenticate(&req.username, &req.password)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let token = state.users.open_session(&user_id).await;
    let cookie = format!("{}={}; HttpOnly; Path=/", SESSION_COOKIE, token);

    tracing::info!(username = %req.username, "User logged in");
    Ok(([(header::SET_COOKIE, cookie)], message("Login successful")))
}

/// GET /logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.users.close_session(&token).await;
    }

    let cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE);
    ([(header::SET_COOKIE, cookie)], message("Logged out successfully"))
}
