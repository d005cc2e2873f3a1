//! Note List Component
//!
//! Renders the notes container with one card per note.

use leptos::*;
use wasm_bindgen::JsCast;

use super::ids::NOTES_CONTAINER_ID;
use crate::state::{Note, NotesState};

/// Reads the note id from the clicked delete icon
fn clicked_note_id(ev: &ev::MouseEvent) -> Option<String> {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.get_attribute("data-id"))
}

#[component]
pub fn NoteList() -> impl IntoView {
    let state = expect_context::<NotesState>();

    view! {
        <div id=NOTES_CONTAINER_ID>
            {move || {
                state.notes.get()
                    .into_iter()
                    .map(|note| view! { <NoteCard note=note /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn NoteCard(note: Note) -> impl IntoView {
    let state = expect_context::<NotesState>();

    let on_delete = move |ev: ev::MouseEvent| match clicked_note_id(&ev) {
        Some(id) => state.delete_note(id),
        None => web_sys::console::warn_1(&"Delete clicked on a note without an id".into()),
    };

    view! {
        <div class="note">
            <div class="note-title">{note.title}</div>
            <div class="note-content">{note.content}</div>
            <div class="note-actions">
                <span class="delete-note">
                    <i class="fa fa-trash-o" data-id=note.id on:click=on_delete></i>
                </span>
            </div>
        </div>
    }
}
