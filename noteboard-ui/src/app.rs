//! App Root Component
//!
//! Provides the widget state, loads the note list once on mount and lays out
//! the list, the create dialog and the chat panel.

use leptos::*;

use crate::api;
use crate::components::{ChatPanel, NoteList, NoteModal};
use crate::state::provide_notes_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_notes_state();
    state.load_notes();

    view! {
        <div class="container">
            <header class="header">
                <h1>"Notes"</h1>
                <button class="add-note-btn" on:click=move |_| state.show_create_dialog()>
                    "+ Add Note"
                </button>
            </header>

            <NoteList />
            <NoteModal />
            <ChatPanel />

            <ApiSettings />
        </div>
    }
}

/// Footer for pointing the widget at another notes API
#[component]
fn ApiSettings() -> impl IntoView {
    let state = expect_context::<crate::state::NotesState>();
    let (url, set_url) = create_signal(api::get_api_base());

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        api::set_api_base(&url.get_untracked());
        state.load_notes();
    };

    view! {
        <footer class="api-settings">
            <form on:submit=on_save>
                <label>"API URL "</label>
                <input
                    type="url"
                    prop:value=move || url.get()
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="submit">"Connect"</button>
            </form>
        </footer>
    }
}
