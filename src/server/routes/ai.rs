//! Chat Route
//!
//! - POST /notes/ai - Ask the assistant a question about your notes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::models::{ChatPrompt, ChatReply};
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// POST /notes/ai
///
/// Answers with the current notes as context.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatPrompt>,
) -> ApiResult<(StatusCode, Json<ChatReply>)> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::Validation("prompt cannot be empty".to_string()));
    }

    let notes = state.notes.list().await;
    let reply = state
        .assistant
        .reply(&req.prompt, &notes)
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

    tracing::debug!(prompt_len = req.prompt.len(), reply_len = reply.len(), "Answered chat prompt");

    Ok((StatusCode::CREATED, Json(ChatReply { reply })))
}
