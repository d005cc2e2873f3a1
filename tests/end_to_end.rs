//! Drives the widget over real HTTP against the development API.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use noteboard::client::{HttpNotesApi, HttpNotesApiConfig};
use noteboard::models::NewNote;
use noteboard::server::{serve_with_listener, AppState};
use noteboard::widget::{Event, Field, NotesClient, Page};

struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            serve_with_listener(listener, AppState::new(), async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
        }
    }

    fn api(&self) -> Arc<HttpNotesApi> {
        Arc::new(
            HttpNotesApi::new(HttpNotesApiConfig {
                base_url: self.base_url.clone(),
                request_timeout_ms: 5000,
            })
            .unwrap(),
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[tokio::test]
async fn test_widget_round_trip() {
    let server = TestServer::start().await;
    let api = server.api();
    let widget = NotesClient::start(api.clone()).await;
    assert!(widget.page().await.rendered_notes().is_empty());

    // Creating without a session is rejected and the dialog stays open
    widget.show_create_dialog().await;
    widget.set_field(Field::Title, "Groceries").await;
    widget.set_field(Field::Content, "milk and eggs").await;
    widget.dispatch(&mut Event::submit(Page::note_form())).await;
    assert!(widget.page().await.modal().is_visible());
    assert!(widget.page().await.rendered_notes().is_empty());

    // The session cookie is sent on create once logged in
    api.register("alice", "secret").await.unwrap();
    api.login("alice", "secret").await.unwrap();
    widget.dispatch(&mut Event::submit(Page::note_form())).await;

    let page = widget.page().await;
    assert!(!page.modal().is_visible());
    let notes = page.rendered_notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].content, "milk and eggs");
    let id = notes[0].id.clone().unwrap();

    // Chat answers from the stored notes
    widget.set_field(Field::ChatInput, "do I need eggs?").await;
    widget.dispatch(&mut Event::click(Page::send_button())).await;
    let lines = widget.page().await.transcript_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "You: do I need eggs?");
    assert!(lines[1].starts_with("AI: Here is what your notes say:"));
    assert!(lines[1].contains("Groceries: milk and eggs"));

    // Account-level extras
    api.update_note(&id, &NewNote::new("Groceries", "milk"))
        .await
        .unwrap();
    assert_eq!(api.get_note(&id).await.unwrap().content, "milk");

    // Delete through the rendered icon
    let button = widget.page().await.delete_button(&id).unwrap();
    widget.dispatch(&mut Event::click(button)).await;
    assert!(widget.page().await.rendered_notes().is_empty());

    let err = api.get_note(&id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    api.logout().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_api_leaves_page_untouched() {
    // Reserve a port, then close it so every connection is refused
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = Arc::new(
        HttpNotesApi::new(HttpNotesApiConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            request_timeout_ms: 2000,
        })
        .unwrap(),
    );

    let widget = NotesClient::start(api).await;
    widget.show_create_dialog().await;
    let before = widget.page().await.render_html();

    widget.load_notes().await;
    widget.dispatch(&mut Event::submit(Page::note_form())).await;
    widget.set_field(Field::ChatInput, "hello").await;
    widget.dispatch(&mut Event::click(Page::send_button())).await;

    let page = widget.page().await;
    assert!(page.transcript_lines().is_empty());
    assert_eq!(
        page.render_html().replace("value=\"hello\"", "value=\"\""),
        before
    );
}
