//! Chat Panel Component

use leptos::*;

use crate::state::NotesState;

#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<NotesState>();

    let on_send = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        state.send_chat_prompt();
    };

    view! {
        <div class="chat-container">
            <div class="chat-section">
                {move || {
                    state.transcript.get()
                        .iter()
                        .flat_map(|exchange| {
                            exchange.entries().map(|(speaker, text)| {
                                let text = format!(" {}", text);
                                view! {
                                    <div class="chat-message">
                                        <div class="message">
                                            <h5>{speaker}</h5>
                                            {text}
                                        </div>
                                    </div>
                                }
                            })
                        })
                        .collect_view()
                }}
            </div>
            <input
                type="text"
                class="chat-input"
                placeholder="Ask about your notes..."
                prop:value=move || state.chat_input.get()
                on:input=move |ev| state.chat_input.set(event_target_value(&ev))
            />
            <button class="send-btn" on:click=on_send>"Send"</button>
        </div>
    }
}
