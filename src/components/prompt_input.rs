//! Prompt composer.

use leptos::prelude::*;

use crate::net::chat_client::ChatClient;
use crate::state::chat::ChatState;

/// Textarea plus send button. Enter sends, Shift+Enter inserts a newline.
/// Input stays disabled while a send is outstanding or a reply is revealing.
#[component]
pub fn PromptInput() -> impl IntoView {
    let client = expect_context::<ChatClient>();
    let chat = client.chat;
    let input = RwSignal::new(String::new());

    let busy = move || chat.with(ChatState::is_busy);

    let do_send = move || {
        let text = input.get_untracked();
        // A rejected send keeps the draft.
        if client.send(&text).is_ok() {
            input.set(String::new());
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !busy();

    view! {
        <div class="chat-input">
            <textarea
                class="chat-input__field"
                rows="2"
                placeholder="Type a message..."
                disabled=busy
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button class="btn btn--primary chat-input__send" on:click=move |_| do_send() disabled=move || !can_send()>
                {move || if chat.with(ChatState::is_sending) { "Sending..." } else { "Send" }}
            </button>
        </div>
    }
}
