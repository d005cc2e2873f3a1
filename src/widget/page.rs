//! Page Model
//!
//! The widget's view of the document: the note list container, the create
//! dialog, the form fields and the chat transcript.

use crate::markup::Element;
use crate::models::{ChatExchange, Note};

pub const NOTES_CONTAINER_ID: &str = "notes-container";
pub const MODAL_ID: &str = "noteModal";
pub const NOTE_FORM_ID: &str = "noteForm";
pub const TITLE_FIELD_ID: &str = "noteTitle";
pub const CONTENT_FIELD_ID: &str = "noteContent";

pub const ADD_NOTE_CLASS: &str = "add-note-btn";
pub const CLOSE_CLASS: &str = "close-btn";
pub const SEND_CLASS: &str = "send-btn";
pub const CHAT_INPUT_CLASS: &str = "chat-input";
pub const TRANSCRIPT_CLASS: &str = "chat-section";
pub const DELETE_CLASS: &str = "delete-note";
pub const DELETE_ICON_CLASS: &str = "fa-trash-o";

/// Editable inputs on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    ChatInput,
}

/// The single create-note dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    visible: bool,
}

impl Modal {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The backdrop container; outside clicks land here
    pub fn backdrop() -> Element {
        Element::new("div").id(MODAL_ID).class("modal")
    }

    /// The dialog body inside the backdrop
    pub fn content() -> Element {
        Element::new("div").class("modal-content")
    }

    /// Whether `target` is the backdrop itself rather than one of its descendants
    pub fn is_backdrop(target: &Element) -> bool {
        target.element_id() == Some(MODAL_ID)
    }
}

/// A note as read back from the rendered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
}

/// In-memory document for the widget
#[derive(Debug, Clone)]
pub struct Page {
    notes: Element,
    modal: Modal,
    title: String,
    content: String,
    chat_input: String,
    transcript: Element,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            notes: Element::new("div").id(NOTES_CONTAINER_ID),
            modal: Modal::default(),
            title: String::new(),
            content: String::new(),
            chat_input: String::new(),
            transcript: Element::new("div").class(TRANSCRIPT_CLASS),
        }
    }

    pub fn notes_container(&self) -> &Element {
        &self.notes
    }

    /// Clear the list and rebuild it from `notes`, in the given order
    pub fn replace_notes(&mut self, notes: &[Note]) {
        self.notes.clear();
        for note in notes {
            self.notes.append(note_card(note));
        }
    }

    /// Read the note list back out of the DOM
    pub fn rendered_notes(&self) -> Vec<RenderedNote> {
        self.notes
            .child_elements()
            .filter(|el| el.has_class("note"))
            .map(|card| {
                let text_of = |class: &str| {
                    card.find_by_class(class)
                        .first()
                        .map(|el| el.text_content())
                        .unwrap_or_default()
                };
                RenderedNote {
                    id: card
                        .find(|el| el.get_data("id").is_some())
                        .and_then(|el| el.get_data("id"))
                        .map(str::to_string),
                    title: text_of("note-title"),
                    content: text_of("note-content"),
                }
            })
            .collect()
    }

    /// The delete icon rendered for note `id`
    pub fn delete_button(&self, id: &str) -> Option<Element> {
        self.notes
            .find(|el| el.get_data("id") == Some(id))
            .cloned()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
            Field::ChatInput => &self.chat_input,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Content => self.content = value,
            Field::ChatInput => self.chat_input = value,
        }
    }

    pub fn transcript(&self) -> &Element {
        &self.transcript
    }

    pub fn append_exchange(&mut self, exchange: &ChatExchange) {
        for entry in transcript_entry(exchange) {
            self.transcript.append(entry);
        }
    }

    /// One line per rendered transcript message, e.g. `"You: hello"`
    pub fn transcript_lines(&self) -> Vec<String> {
        self.transcript
            .find_by_class("message")
            .into_iter()
            .map(|el| el.text_content())
            .collect()
    }

    // Event targets for the static controls

    pub fn add_note_button() -> Element {
        Element::new("button").class(ADD_NOTE_CLASS).text("Add note")
    }

    pub fn close_button() -> Element {
        Element::new("span").class(CLOSE_CLASS).text("\u{00d7}")
    }

    pub fn send_button() -> Element {
        Element::new("button").class(SEND_CLASS).text("Send")
    }

    pub fn note_form() -> Element {
        Element::new("form").id(NOTE_FORM_ID)
    }

    /// Full widget markup
    pub fn render_html(&self) -> String {
        let display = if self.modal.is_visible() { "block" } else { "none" };

        let form = Page::note_form()
            .child(
                Element::new("input")
                    .attr("type", "text")
                    .id(TITLE_FIELD_ID)
                    .attr("value", self.title.as_str()),
            )
            .child(
                Element::new("textarea")
                    .id(CONTENT_FIELD_ID)
                    .text(self.content.as_str()),
            )
            .child(Element::new("button").attr("type", "submit").text("Save"));

        let modal = Modal::backdrop()
            .attr("style", format!("display: {}", display))
            .child(Modal::content().child(Page::close_button()).child(form));

        let chat = Element::new("div")
            .class("chat")
            .child(self.transcript.clone())
            .child(
                Element::new("input")
                    .attr("type", "text")
                    .class(CHAT_INPUT_CLASS)
                    .attr("value", self.chat_input.as_str()),
            )
            .child(Page::send_button());

        Element::new("div")
            .class("noteboard")
            .child(Page::add_note_button())
            .child(self.notes.clone())
            .child(modal)
            .child(chat)
            .render()
    }
}

/// Markup for a single note in the list
pub fn note_card(note: &Note) -> Element {
    Element::new("div")
        .class("note")
        .child(Element::new("div").class("note-title").text(note.title.as_str()))
        .child(Element::new("div").class("note-content").text(note.content.as_str()))
        .child(
            Element::new("div").class("note-actions").child(
                Element::new("span").class(DELETE_CLASS).child(
                    Element::new("i")
                        .class(format!("fa {}", DELETE_ICON_CLASS))
                        .data("id", note.id.as_str()),
                ),
            ),
        )
}

/// The two transcript messages for one exchange: the echoed prompt, then the reply
pub fn transcript_entry(exchange: &ChatExchange) -> [Element; 2] {
    let message = |speaker: &str, text: &str| {
        Element::new("div").class("chat-message").child(
            Element::new("div")
                .class("message")
                .child(Element::new("h5").text(format!("{}:", speaker)))
                .text(format!(" {}", text)),
        )
    };

    [
        message("You", &exchange.prompt),
        message("AI", &exchange.reply),
    ]
}
