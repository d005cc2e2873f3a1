//! Widget State
//!
//! Reactive state using Leptos signals. Each handler issues one request and,
//! on failure, logs to the browser console and leaves the state as it was.

use leptos::*;
use serde::{Deserialize, Deserializer};

use crate::api;

/// A note as returned by the notes API
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Note {
    #[serde(rename = "notes_id", default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// Ids are opaque; numeric ids keep their decimal text
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
        RawId::Float(id) => id.to_string(),
    }))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One prompt and its reply
#[derive(Clone, Debug, PartialEq)]
pub struct ChatExchange {
    pub prompt: String,
    pub reply: String,
}

impl ChatExchange {
    /// Speaker label and text for each transcript entry
    pub fn entries(&self) -> [(&'static str, &str); 2] {
        [("You:", self.prompt.as_str()), ("AI:", self.reply.as_str())]
    }
}

/// Widget state provided to all components
#[derive(Clone, Copy)]
pub struct NotesState {
    /// Notes currently rendered in the list
    pub notes: RwSignal<Vec<Note>>,
    /// Create dialog visibility
    pub modal_open: RwSignal<bool>,
    pub title: RwSignal<String>,
    pub content: RwSignal<String>,
    pub chat_input: RwSignal<String>,
    /// Append-only chat transcript
    pub transcript: RwSignal<Vec<ChatExchange>>,
}

/// Provide widget state to the component tree
pub fn provide_notes_state() -> NotesState {
    let state = NotesState {
        notes: create_rw_signal(Vec::new()),
        modal_open: create_rw_signal(false),
        title: create_rw_signal(String::new()),
        content: create_rw_signal(String::new()),
        chat_input: create_rw_signal(String::new()),
        transcript: create_rw_signal(Vec::new()),
    };

    provide_context(state);
    state
}

fn log_error(context: &str, error: &str) {
    web_sys::console::error_1(&format!("{}: {}", context, error).into());
}

impl NotesState {
    /// Fetch the note list and replace the rendered notes
    pub fn load_notes(self) {
        spawn_local(async move {
            match api::fetch_notes().await {
                Ok(notes) => self.notes.set(notes),
                Err(e) => log_error("Error fetching notes", &e),
            }
        });
    }

    pub fn show_create_dialog(self) {
        self.modal_open.set(true);
    }

    pub fn hide_create_dialog(self) {
        self.modal_open.set(false);
    }

    /// Create a note from the form fields
    pub fn submit_note(self) {
        let title = self.title.get_untracked();
        let content = self.content.get_untracked();

        spawn_local(async move {
            match api::create_note(&title, &content).await {
                Ok(()) => {
                    self.hide_create_dialog();
                    self.load_notes();
                }
                Err(e) => log_error("Error adding note", &e),
            }
        });
    }

    pub fn delete_note(self, id: String) {
        spawn_local(async move {
            match api::delete_note(&id).await {
                Ok(()) => self.load_notes(),
                Err(e) => log_error("Error deleting note", &e),
            }
        });
    }

    /// Send the chat input and append the exchange to the transcript
    pub fn send_chat_prompt(self) {
        let prompt = self.chat_input.get_untracked();

        spawn_local(async move {
            match api::send_prompt(&prompt).await {
                Ok(reply) => self
                    .transcript
                    .update(|t| t.push(ChatExchange { prompt, reply })),
                Err(e) => log_error("Error sending prompt", &e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_wire_format() {
        let notes: Vec<Note> = serde_json::from_str(
            r#"[{"notes_id":"1","title":"A","content":"x"},{"title":"B","content":"y"}]"#,
        )
        .unwrap();
        assert_eq!(notes[0].id.as_deref(), Some("1"));
        assert_eq!(notes[1].id, None);
        assert_eq!(notes[1].title, "B");
    }

    #[test]
    fn test_numeric_id_and_null_fields() {
        let notes: Vec<Note> = serde_json::from_str(
            r#"[{"notes_id":42,"title":null,"content":"x"},{"notes_id":null,"content":null}]"#,
        )
        .unwrap();
        assert_eq!(notes[0].id.as_deref(), Some("42"));
        assert_eq!(notes[0].title, "");
        assert_eq!(notes[1].id, None);
        assert_eq!(notes[1].content, "");
    }

    #[test]
    fn test_exchange_entries() {
        let exchange = ChatExchange {
            prompt: "hi".to_string(),
            reply: "<b>hello</b>".to_string(),
        };
        assert_eq!(exchange.entries(), [("You:", "hi"), ("AI:", "<b>hello</b>")]);
    }
}
