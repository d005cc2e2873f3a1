//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::assistant::{Assistant, NotesAssistant};
use super::store::{NoteStore, UserStore};
use crate::models::NewNote;

/// Shared application state for all handlers
pub struct AppState {
    /// Notes in insertion order
    pub notes: NoteStore,
    /// Accounts and open sessions
    pub users: UserStore,
    /// Backend for the chat endpoint
    pub assistant: Arc<dyn Assistant>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create state with the keyword assistant
    pub fn new() -> Self {
        Self::with_assistant(Arc::new(NotesAssistant))
    }

    pub fn with_assistant(assistant: Arc<dyn Assistant>) -> Self {
        Self {
            notes: NoteStore::new(),
            users: UserStore::new(),
            assistant,
            start_time: Instant::now(),
        }
    }

    /// Store a few sample notes
    pub async fn seed_notes(&self) {
        let samples = [
            ("Welcome", "Click the trash icon to delete a note."),
            ("Groceries", "Milk, eggs, coffee"),
            ("Ask the assistant", "Try asking: what do I need from the store?"),
        ];
        for (title, content) in samples {
            self.notes.insert(NewNote::new(title, content)).await;
        }
        tracing::info!(count = samples.len(), "Seeded sample notes");
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
