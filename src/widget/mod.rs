//! Notes Widget
//!
//! `NotesClient` binds page events to notes API calls. Every handler follows
//! the same shape: read what it needs from the page, issue one request, and on
//! success patch the page. Failures are logged and otherwise swallowed; the
//! page is left exactly as it was.
//!
//! The page lock is never held across a request, so overlapping handlers may
//! interleave and the note list shows whichever fetch resolved last.

mod event;
mod page;

pub use event::{Event, EventKind};
pub use page::{
    note_card, transcript_entry, Field, Modal, Page, RenderedNote, ADD_NOTE_CLASS,
    CHAT_INPUT_CLASS, CLOSE_CLASS, DELETE_CLASS, DELETE_ICON_CLASS, MODAL_ID,
    NOTES_CONTAINER_ID, NOTE_FORM_ID, SEND_CLASS, TRANSCRIPT_CLASS,
};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::NotesApi;
use crate::markup::Element;
use crate::models::{ChatExchange, ChatPrompt, NewNote};

/// Controller for the notes widget
#[derive(Clone)]
pub struct NotesClient {
    api: Arc<dyn NotesApi>,
    page: Arc<RwLock<Page>>,
}

/// Which listener a click is bound to
enum ClickRoute {
    OpenDialog,
    CloseDialog,
    SendChat,
    DeleteNote,
    Unbound,
}

impl ClickRoute {
    fn for_target(target: &Element) -> Self {
        if target.has_class(ADD_NOTE_CLASS) {
            ClickRoute::OpenDialog
        } else if target.has_class(CLOSE_CLASS) {
            ClickRoute::CloseDialog
        } else if target.has_class(SEND_CLASS) {
            ClickRoute::SendChat
        } else if target.has_class(DELETE_ICON_CLASS) {
            ClickRoute::DeleteNote
        } else {
            ClickRoute::Unbound
        }
    }
}

impl NotesClient {
    /// Create a client with an empty page
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            page: Arc::new(RwLock::new(Page::new())),
        }
    }

    /// Build the widget and run the initial list fetch.
    ///
    /// Called once by the hosting shell.
    pub async fn start(api: Arc<dyn NotesApi>) -> Self {
        let client = Self::new(api);
        tracing::info!("Starting notes widget");
        client.load_notes().await;
        client
    }

    /// Snapshot of the current page
    pub async fn page(&self) -> Page {
        self.page.read().await.clone()
    }

    /// Type into one of the page's inputs
    pub async fn set_field(&self, field: Field, value: impl Into<String>) {
        self.page.write().await.set_field(field, value);
    }

    /// Route an event to its listener.
    ///
    /// Clicks also reach the window-level outside-click handler, after the
    /// element's own listener.
    pub async fn dispatch(&self, event: &mut Event) {
        match event.kind() {
            EventKind::Submit => {
                if event.target().element_id() == Some(NOTE_FORM_ID) {
                    self.submit_note(event).await;
                }
            }
            EventKind::Click => {
                match ClickRoute::for_target(event.target()) {
                    ClickRoute::OpenDialog => self.show_create_dialog().await,
                    ClickRoute::CloseDialog => self.hide_create_dialog().await,
                    ClickRoute::SendChat => self.send_chat_prompt(event).await,
                    ClickRoute::DeleteNote => self.delete_note(event).await,
                    ClickRoute::Unbound => {}
                }
                self.dismiss_on_outside_click(event).await;
            }
        }
    }

    /// Fetch all notes and rebuild the list
    pub async fn load_notes(&self) {
        match self.api.list_notes().await {
            Ok(notes) => {
                self.page.write().await.replace_notes(&notes);
                tracing::debug!(count = notes.len(), "Rendered notes");
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching notes");
            }
        }
    }

    pub async fn show_create_dialog(&self) {
        self.page.write().await.modal_mut().show();
    }

    pub async fn hide_create_dialog(&self) {
        self.page.write().await.modal_mut().hide();
    }

    /// Hide the dialog when the click landed on the backdrop itself
    pub async fn dismiss_on_outside_click(&self, event: &Event) {
        if Modal::is_backdrop(event.target()) {
            self.hide_create_dialog().await;
        }
    }

    /// Post the form's title and content as a new note
    pub async fn submit_note(&self, event: &mut Event) {
        event.prevent_default();

        let note = {
            let page = self.page.read().await;
            NewNote::new(page.field(Field::Title), page.field(Field::Content))
        };

        match self.api.create_note(&note).await {
            Ok(()) => {
                tracing::info!(title = %note.title, "Note added");
                self.hide_create_dialog().await;
                self.load_notes().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding note");
            }
        }
    }

    /// Delete the note whose id the clicked element carries
    pub async fn delete_note(&self, event: &Event) {
        let Some(id) = event.target().get_data("id").map(str::to_string) else {
            tracing::warn!("Delete clicked on an element without a note id");
            return;
        };

        match self.api.delete_note(&id).await {
            Ok(()) => {
                tracing::info!(note_id = %id, "Note deleted");
                self.load_notes().await;
            }
            Err(e) => {
                tracing::error!(note_id = %id, error = %e, "Error deleting note");
            }
        }
    }

    /// Send the chat input and append the exchange to the transcript
    pub async fn send_chat_prompt(&self, event: &mut Event) {
        event.prevent_default();

        let prompt = self.page.read().await.field(Field::ChatInput).to_string();
        let request = ChatPrompt {
            prompt: prompt.clone(),
        };

        match self.api.chat(&request).await {
            Ok(reply) => {
                let exchange = ChatExchange {
                    prompt,
                    reply: reply.reply,
                };
                self.page.write().await.append_exchange(&exchange);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error getting chat response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ClientResult};
    use crate::models::{ChatReply, Note};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(NewNote),
        Delete(String),
        Chat(String),
    }

    #[derive(Debug, Clone, Copy)]
    enum Failure {
        Transport,
        Status(u16),
    }

    impl Failure {
        fn error(self) -> ClientError {
            match self {
                Failure::Transport => ClientError::Unavailable,
                Failure::Status(status) => ClientError::Status {
                    status,
                    message: "nope".to_string(),
                },
            }
        }
    }

    /// Scripted notes API that records every call
    #[derive(Default)]
    struct FakeApi {
        notes: Mutex<Vec<Note>>,
        reply: Mutex<String>,
        calls: Mutex<Vec<Call>>,
        failure: Mutex<Option<Failure>>,
    }

    impl FakeApi {
        fn with_notes(notes: Vec<Note>) -> Arc<Self> {
            let api = Self::default();
            *api.notes.lock().unwrap() = notes;
            Arc::new(api)
        }

        fn fail_with(&self, failure: Option<Failure>) {
            *self.failure.lock().unwrap() = failure;
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls().iter().filter(|c| *c == call).count()
        }

        fn check(&self, call: Call) -> ClientResult<()> {
            self.calls.lock().unwrap().push(call);
            match *self.failure.lock().unwrap() {
                Some(failure) => Err(failure.error()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl NotesApi for FakeApi {
        async fn list_notes(&self) -> ClientResult<Vec<Note>> {
            self.check(Call::List)?;
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn create_note(&self, note: &NewNote) -> ClientResult<()> {
            self.check(Call::Create(note.clone()))?;
            let mut notes = self.notes.lock().unwrap();
            let id = (notes.len() + 1).to_string();
            notes.push(Note::new(id, note.title.clone(), note.content.clone()));
            Ok(())
        }

        async fn delete_note(&self, id: &str) -> ClientResult<()> {
            self.check(Call::Delete(id.to_string()))?;
            self.notes.lock().unwrap().retain(|n| n.id != id);
            Ok(())
        }

        async fn chat(&self, prompt: &ChatPrompt) -> ClientResult<ChatReply> {
            self.check(Call::Chat(prompt.prompt.clone()))?;
            Ok(ChatReply {
                reply: self.reply.lock().unwrap().clone(),
            })
        }
    }

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new("a1", "Groceries", "milk, eggs"),
            Note::new("42", "Meeting", "Thursday 10am"),
            Note::new("b7", "Ideas", ""),
        ]
    }

    #[tokio::test]
    async fn test_start_renders_every_note_in_order() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;

        let rendered = client.page().await.rendered_notes();
        let expected = sample_notes();
        assert_eq!(rendered.len(), expected.len());
        for (shown, note) in rendered.iter().zip(&expected) {
            assert_eq!(shown.id.as_deref(), Some(note.id.as_str()));
            assert_eq!(shown.title, note.title);
            assert_eq!(shown.content, note.content);
        }
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;

        *api.notes.lock().unwrap() = vec![];
        for failure in [Failure::Transport, Failure::Status(500)] {
            api.fail_with(Some(failure));
            client.load_notes().await;
            assert_eq!(client.page().await.rendered_notes().len(), 3);
        }
    }

    #[tokio::test]
    async fn test_submit_posts_exact_body_then_refetches_and_hides() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api.clone()).await;

        client.dispatch(&mut Event::click(Page::add_note_button())).await;
        assert!(client.page().await.modal().is_visible());

        client.set_field(Field::Title, "T").await;
        client.set_field(Field::Content, "C").await;
        let mut event = Event::submit(Page::note_form());
        client.dispatch(&mut event).await;

        assert!(event.default_prevented());
        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        match &calls[1] {
            Call::Create(body) => {
                assert_eq!(serde_json::to_string(body).unwrap(), r#"{"title":"T","content":"C"}"#)
            }
            other => panic!("expected create, got {:?}", other),
        }
        assert_eq!(calls[2], Call::List);

        let page = client.page().await;
        assert!(!page.modal().is_visible());
        assert_eq!(page.rendered_notes()[0].title, "T");
    }

    #[tokio::test]
    async fn test_submit_sends_empty_fields_as_is() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api.clone()).await;

        client.submit_note(&mut Event::submit(Page::note_form())).await;
        assert_eq!(api.count(&Call::Create(NewNote::new("", ""))), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_dialog_open_with_values() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api.clone()).await;

        client.show_create_dialog().await;
        client.set_field(Field::Title, "draft").await;
        client.set_field(Field::Content, "body").await;
        api.fail_with(Some(Failure::Status(401)));
        client.submit_note(&mut Event::submit(Page::note_form())).await;

        let page = client.page().await;
        assert!(page.modal().is_visible());
        assert_eq!(page.field(Field::Title), "draft");
        assert_eq!(page.field(Field::Content), "body");
        assert_eq!(api.count(&Call::List), 1);
    }

    #[tokio::test]
    async fn test_delete_issues_one_delete_and_one_refetch() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;

        let button = client.page().await.delete_button("42").unwrap();
        client.dispatch(&mut Event::click(button)).await;

        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Delete("42".to_string()), Call::List]
        );
        let ids: Vec<_> = client
            .page()
            .await
            .rendered_notes()
            .into_iter()
            .filter_map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a1", "b7"]);
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_refetch() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;

        api.fail_with(Some(Failure::Transport));
        let button = client.page().await.delete_button("42").unwrap();
        client.delete_note(&Event::click(button)).await;

        assert_eq!(api.count(&Call::List), 1);
        assert_eq!(client.page().await.rendered_notes().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_without_id_sends_nothing() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api.clone()).await;

        client.delete_note(&Event::click(Element::new("i"))).await;
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_only_trash_icon_clicks_delete() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;

        let other = Element::new("div").class("note").data("id", "42");
        client.dispatch(&mut Event::click(other)).await;
        let bare_icon = Element::new("i").class(format!("fa {}", DELETE_ICON_CLASS));
        client.dispatch(&mut Event::click(bare_icon)).await;

        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(client.page().await.rendered_notes().len(), 3);
    }

    #[tokio::test]
    async fn test_outside_click_only_on_backdrop() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api).await;
        client.show_create_dialog().await;

        client.dispatch(&mut Event::click(Modal::content())).await;
        assert!(client.page().await.modal().is_visible());

        client.dispatch(&mut Event::click(Page::note_form())).await;
        assert!(client.page().await.modal().is_visible());

        client.dispatch(&mut Event::click(Modal::backdrop())).await;
        assert!(!client.page().await.modal().is_visible());
    }

    #[tokio::test]
    async fn test_close_button_hides_dialog() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api).await;

        client.show_create_dialog().await;
        client.dispatch(&mut Event::click(Page::close_button())).await;
        assert!(!client.page().await.modal().is_visible());

        // Hiding twice is harmless
        client.hide_create_dialog().await;
        assert!(!client.page().await.modal().is_visible());
    }

    #[tokio::test]
    async fn test_chat_appends_exchange_and_keeps_input() {
        let api = FakeApi::with_notes(vec![]);
        *api.reply.lock().unwrap() = "hi".to_string();
        let client = NotesClient::start(api.clone()).await;

        client.set_field(Field::ChatInput, "hello").await;
        let mut event = Event::click(Page::send_button());
        client.dispatch(&mut event).await;

        assert!(event.default_prevented());
        let page = client.page().await;
        assert_eq!(page.transcript_lines(), vec!["You: hello", "AI: hi"]);
        assert_eq!(page.field(Field::ChatInput), "hello");

        *api.reply.lock().unwrap() = "again".to_string();
        client.set_field(Field::ChatInput, "second").await;
        client.send_chat_prompt(&mut Event::click(Page::send_button())).await;
        assert_eq!(
            client.page().await.transcript_lines(),
            vec!["You: hello", "AI: hi", "You: second", "AI: again"]
        );
        assert_eq!(api.count(&Call::Chat("second".to_string())), 1);
    }

    #[tokio::test]
    async fn test_failed_chat_leaves_transcript() {
        let api = FakeApi::with_notes(vec![]);
        let client = NotesClient::start(api.clone()).await;

        client.set_field(Field::ChatInput, "hello").await;
        api.fail_with(Some(Failure::Status(502)));
        client.send_chat_prompt(&mut Event::click(Page::send_button())).await;

        assert!(client.page().await.transcript_lines().is_empty());
    }

    #[tokio::test]
    async fn test_every_failure_leaves_page_untouched() {
        let api = FakeApi::with_notes(sample_notes());
        let client = NotesClient::start(api.clone()).await;
        client.show_create_dialog().await;
        client.set_field(Field::ChatInput, "q").await;
        let before = client.page().await.render_html();

        api.fail_with(Some(Failure::Transport));
        client.load_notes().await;
        client.submit_note(&mut Event::submit(Page::note_form())).await;
        let button = client.page().await.delete_button("a1").unwrap();
        client.dispatch(&mut Event::click(button)).await;
        client.send_chat_prompt(&mut Event::click(Page::send_button())).await;

        assert_eq!(client.page().await.render_html(), before);
    }
}
