//! HTTP API Client
//!
//! Functions for communicating with the notes API. List and create carry the
//! browser's session cookie; delete and chat are sent without credentials.

use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::state::Note;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Local storage key holding an API base URL override
pub const API_URL_KEY: &str = "noteboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());
    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn notes_url(base: &str) -> String {
    format!("{}/notes", base)
}

fn note_url(base: &str, id: &str) -> String {
    format!("{}/notes/{}", base, urlencoding::encode(id))
}

fn chat_url(base: &str) -> String {
    format!("{}/notes/ai", base)
}

// ============ Wire Types ============

#[derive(Debug, serde::Serialize)]
struct NewNoteRequest<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct ChatReplyResponse {
    #[serde(rename = "AI")]
    reply: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(alias = "message")]
    error: String,
}

async fn error_from(response: gloo_net::http::Response) -> String {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) => format!("HTTP {}: {}", status, body.error),
        Err(_) => format!("HTTP {}: {}", status, response.status_text()),
    }
}

// ============ API Functions ============

/// Fetch all notes
pub async fn fetch_notes() -> Result<Vec<Note>, String> {
    let response = Request::get(&notes_url(&get_api_base()))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Create a note; the response body is not used
pub async fn create_note(title: &str, content: &str) -> Result<(), String> {
    let response = Request::post(&notes_url(&get_api_base()))
        .credentials(RequestCredentials::Include)
        .json(&NewNoteRequest { title, content })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

/// Delete a note by id
pub async fn delete_note(id: &str) -> Result<(), String> {
    let response = Request::delete(&note_url(&get_api_base(), id))
        .credentials(RequestCredentials::Omit)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

/// Send a prompt to the chat endpoint and return the reply text
pub async fn send_prompt(prompt: &str) -> Result<String, String> {
    let response = Request::post(&chat_url(&get_api_base()))
        .credentials(RequestCredentials::Omit)
        .json(&PromptRequest { prompt })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }

    let reply: ChatReplyResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;
    Ok(reply.reply)
}
