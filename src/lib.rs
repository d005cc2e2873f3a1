//! # Noteboard
//!
//! A note-taking widget with an AI chat panel. The widget lists notes from a
//! remote notes API, creates notes through a modal form, deletes them, and
//! sends single-turn prompts to the API's chat endpoint.
//!
//! ## Modules
//!
//! - [`widget`]: `NotesClient`, the event handlers, and the page model they patch
//! - [`client`]: the `NotesApi` transport seam and its `reqwest` implementation
//! - [`markup`]: structured, escaping element tree used for the page
//! - [`server`]: in-memory development implementation of the notes API
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noteboard::client::{HttpNotesApi, HttpNotesApiConfig};
//! use noteboard::widget::{Event, Field, NotesClient, Page};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpNotesApi::new(HttpNotesApiConfig::default())?);
//!     let widget = NotesClient::start(api).await;
//!
//!     widget.set_field(Field::ChatInput, "what is on my shopping list?").await;
//!     widget.dispatch(&mut Event::click(Page::send_button())).await;
//!
//!     println!("{}", widget.page().await.render_html());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod markup;
pub mod models;
pub mod server;
pub mod widget;

// Re-export top-level types for convenience
pub use client::{ClientError, ClientResult, HttpNotesApi, HttpNotesApiConfig, NotesApi};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use markup::{Element, Node};

pub use models::{ChatExchange, ChatPrompt, ChatReply, NewNote, Note};

pub use server::{build_router, serve, ApiError, AppState, Assistant, NotesAssistant};

pub use widget::{Event, EventKind, Field, Modal, NotesClient, Page, RenderedNote};
