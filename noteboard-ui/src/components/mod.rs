//! UI Components
//!
//! Leptos components for the notes list, the create dialog and the chat panel.

pub mod chat_panel;
pub mod note_list;
pub mod note_modal;

pub use chat_panel::ChatPanel;
pub use note_list::NoteList;
pub use note_modal::NoteModal;

/// Element ids and classes the widget's markup is built from
pub mod ids {
    pub const NOTES_CONTAINER_ID: &str = "notes-container";
    pub const MODAL_ID: &str = "noteModal";
    pub const NOTE_FORM_ID: &str = "noteForm";
    pub const TITLE_FIELD_ID: &str = "noteTitle";
    pub const CONTENT_FIELD_ID: &str = "noteContent";
}
