//! Chat Assistant
//!
//! Backend for `POST /notes/ai`. Each prompt is answered with the current
//! notes as context.

use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::Note;

/// Errors from an assistant backend
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),
}

/// Produces a reply for a single prompt
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, prompt: &str, notes: &[Note]) -> Result<String, AssistantError>;
}

/// Offline assistant that answers by keyword lookup over the notes.
///
/// Words shorter than three characters are ignored; matching is
/// case-insensitive over titles and content.
#[derive(Debug, Default, Clone)]
pub struct NotesAssistant;

impl NotesAssistant {
    fn keywords(prompt: &str) -> BTreeSet<String> {
        prompt
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 3)
            .map(str::to_lowercase)
            .collect()
    }
}

#[async_trait]
impl Assistant for NotesAssistant {
    async fn reply(&self, prompt: &str, notes: &[Note]) -> Result<String, AssistantError> {
        if notes.is_empty() {
            return Ok("You don't have any notes yet.".to_string());
        }

        let keywords = Self::keywords(prompt);
        let matches: Vec<&Note> = notes
            .iter()
            .filter(|note| {
                let title = note.title.to_lowercase();
                let content = note.content.to_lowercase();
                keywords
                    .iter()
                    .any(|k| title.contains(k.as_str()) || content.contains(k.as_str()))
            })
            .collect();

        if matches.is_empty() {
            return Ok(format!(
                "I couldn't find anything about that in your {} note{}.",
                notes.len(),
                if notes.len() == 1 { "" } else { "s" }
            ));
        }

        let mut reply = String::from("Here is what your notes say:");
        for note in matches {
            reply.push_str(&format!("\n- {}: {}", note.title, note.content));
        }
        Ok(reply)
    }
}
