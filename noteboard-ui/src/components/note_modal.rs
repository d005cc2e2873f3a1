//! Create Dialog Component
//!
//! Modal with the note form. Clicking the backdrop itself closes it; clicks
//! inside the dialog content do not.

use leptos::*;
use wasm_bindgen::JsCast;

use super::ids::{CONTENT_FIELD_ID, MODAL_ID, NOTE_FORM_ID, TITLE_FIELD_ID};
use crate::state::NotesState;

fn is_backdrop(ev: &ev::MouseEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.id() == MODAL_ID)
        .unwrap_or(false)
}

#[component]
pub fn NoteModal() -> impl IntoView {
    let state = expect_context::<NotesState>();

    let outside_click = window_event_listener(ev::click, move |ev| {
        if is_backdrop(&ev) {
            state.hide_create_dialog();
        }
    });
    on_cleanup(move || outside_click.remove());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit_note();
    };

    view! {
        <div
            id=MODAL_ID
            class="modal"
            style:display=move || if state.modal_open.get() { "block" } else { "none" }
        >
            <div class="modal-content">
                <span class="close-btn" on:click=move |_| state.hide_create_dialog()>"×"</span>
                <form id=NOTE_FORM_ID on:submit=on_submit>
                    <input
                        type="text"
                        id=TITLE_FIELD_ID
                        placeholder="Title"
                        prop:value=move || state.title.get()
                        on:input=move |ev| state.title.set(event_target_value(&ev))
                    />
                    <textarea
                        id=CONTENT_FIELD_ID
                        placeholder="Content"
                        prop:value=move || state.content.get()
                        on:input=move |ev| state.content.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit">"Save"</button>
                </form>
            </div>
        </div>
    }
}
