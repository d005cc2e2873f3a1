//! State Management
//!
//! Reactive widget state and the handlers that update it.

pub mod notes;

pub use notes::{provide_notes_state, ChatExchange, Note, NotesState};
