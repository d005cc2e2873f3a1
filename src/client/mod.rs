//! Notes API Client
//!
//! The transport seam between the widget and the remote notes API.
//!
//! - [`NotesApi`]: the four calls the widget makes
//! - [`HttpNotesApi`]: `reqwest` implementation; a cookie-carrying client for
//!   credentialed calls and a cookieless one for the rest

mod error;
mod http;

pub use error::{ClientError, ClientResult};
pub use http::{HttpNotesApi, HttpNotesApiConfig};

use async_trait::async_trait;

use crate::models::{ChatPrompt, ChatReply, NewNote, Note};

/// Calls the widget issues against the notes API.
///
/// Implementations decide how credentials travel; the widget only relies on
/// the documented policy (sent for list/create, omitted for delete/chat).
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// GET /notes
    async fn list_notes(&self) -> ClientResult<Vec<Note>>;

    /// POST /notes
    async fn create_note(&self, note: &NewNote) -> ClientResult<()>;

    /// DELETE /notes/{id}
    async fn delete_note(&self, id: &str) -> ClientResult<()>;

    /// POST /notes/ai
    async fn chat(&self, prompt: &ChatPrompt) -> ClientResult<ChatReply>;
}
