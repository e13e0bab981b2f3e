//! Sidebar listing the user's recent chat sessions.

use leptos::prelude::*;

use crate::net::chat_client::ChatClient;
use crate::util::format::format_date;

/// Session links, newest first, with the active session highlighted.
#[component]
pub fn SessionList() -> impl IntoView {
    let client = expect_context::<ChatClient>();
    let sessions = client.sessions;
    let chat = client.chat;

    let active_id = move || chat.with(|c| c.session_id());

    view! {
        <nav class="session-list">
            <a href="/" class="btn session-list__new">
                "+ New chat"
            </a>
            <Show when=move || sessions.with(|s| s.error.is_some())>
                <p class="session-list__error">{move || sessions.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || !sessions.with(|s| s.loading && s.items.is_empty())
                fallback=move || view! { <p class="session-list__loading">"Loading chats..."</p> }
            >
                <ul class="session-list__items">
                    {move || {
                        let active = active_id();
                        sessions
                            .get()
                            .items
                            .into_iter()
                            .map(|item| {
                                let href = format!("/chat/{}", item.id);
                                let is_active = active == Some(item.id);
                                let date = item.created_at.map(format_date).unwrap_or_default();
                                view! {
                                    <li class="session-list__item" class:session-list__item--active=is_active>
                                        <a href=href>
                                            <span class="session-list__title">{item.title}</span>
                                            <span class="session-list__date">{date}</span>
                                        </a>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </nav>
    }
}
