//! Dismissible error banner scoped to the chat view.

use leptos::prelude::*;

use crate::net::chat_client::ChatClient;
use crate::state::chat::{ChatError, ChatState};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let client = expect_context::<ChatClient>();
    let chat = client.chat;

    let error = move || chat.with(|c| c.error().cloned());
    let can_retry = move || matches!(error(), Some(ChatError::Load(_)));

    view! {
        <Show when=move || error().is_some()>
            <div class="chat-error" role="alert">
                <span class="chat-error__text">{move || error().map(|e| e.to_string()).unwrap_or_default()}</span>
                <Show when=can_retry>
                    <button class="btn chat-error__retry" on:click=move |_| client.reload()>
                        "Retry"
                    </button>
                </Show>
                <button
                    class="btn chat-error__dismiss"
                    title="Dismiss"
                    on:click=move |_| chat.update(ChatState::dismiss_error)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
