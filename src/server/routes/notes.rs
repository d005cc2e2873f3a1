//! Notes Routes
//!
//! CRUD endpoints for notes.
//!
//! - GET /notes - List all notes, oldest first
//! - POST /notes - Create a note (requires a session)
//! - GET /notes/:id - Get a note
//! - PUT /notes/:id - Replace a note's title and content
//! - DELETE /notes/:id - Delete a note

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::auth::session_user;
use crate::models::{MessageResponse, NewNote, Note};
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// GET /notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<Note>> {
    Json(state.notes.list().await)
}

/// GET /notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Note>> {
    state.notes.get(&id).await.map(Json).ok_or(ApiError::NotFound)
}

/// POST /notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewNote>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let user_id = session_user(&state, &headers)
        .await
        .ok_or_else(|| ApiError::Unauthorized("User not logged in!".to_string()))?;

    let note = state.notes.insert(req).await;
    tracing::info!(note_id = %note.id, user_id = %user_id, "Created note");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Note added successfully!".to_string(),
        }),
    ))
}

/// PUT /notes/:id
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NewNote>,
) -> ApiResult<Json<MessageResponse>> {
    state.notes.update(&id, req).await.ok_or(ApiError::NotFound)?;
    tracing::info!(note_id = %id, "Updated note");

    Ok(Json(MessageResponse {
        message: "Note updated successfully!".to_string(),
    }))
}

/// DELETE /notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.notes.remove(&id).await {
        return Err(ApiError::NotFound);
    }
    tracing::info!(note_id = %id, "Deleted note");

    Ok(Json(MessageResponse {
        message: "Note deleted successfully!".to_string(),
    }))
}
