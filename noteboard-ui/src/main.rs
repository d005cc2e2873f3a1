//! Noteboard Browser Widget
//!
//! Client-side rendered (CSR) Leptos build of the notes widget. It lists notes
//! from the notes API, creates them through a modal form, deletes them, and
//! sends prompts to the chat endpoint.
//!
//! The API base URL is read from local storage (`noteboard_api_url`) and
//! defaults to `http://localhost:3000`.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
