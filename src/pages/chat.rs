//! Chat page: sidebar plus the active conversation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once as the parent of both `/` (new chat) and `/chat/:id`, so
//! moving between them re-selects the session without remounting the view.
//! A remount would finalize a running reveal.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::error_banner::ErrorBanner;
use crate::components::message_list::MessageList;
use crate::components::prompt_input::PromptInput;
use crate::components::session_list::SessionList;
use crate::net::chat_client::ChatClient;
use crate::util::auth::install_identity_watch;

/// Session id named by a route path: `/chat/{id}` → `Some(id)`; anything
/// else, including a non-numeric or non-positive id, is a new chat.
#[must_use]
pub fn session_id_from_path(path: &str) -> Option<i64> {
    let mut segments = path.trim_matches('/').split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("chat"), Some(raw), None) => raw.parse::<i64>().ok().filter(|id| *id > 0),
        _ => None,
    }
}

#[must_use]
pub fn session_path(session_id: i64) -> String {
    format!("/chat/{session_id}")
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let client = expect_context::<ChatClient>();
    let chat = client.chat;
    let sessions = client.sessions;
    let auth = client.auth;
    let location = use_location();
    let navigate = use_navigate();

    let route_session = Memo::new(move |_| location.pathname.with(|p| session_id_from_path(p)));

    Effect::new(move || {
        let session_id = route_session.get();
        client.select(session_id);
    });

    install_identity_watch(client, route_session);

    let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };

    let navigate_created = navigate.clone();
    let replace_created = replace.clone();
    Effect::new(move || {
        if let Some(session_id) = sessions.with(|s| s.created_session_id) {
            sessions.update(|s| s.created_session_id = None);
            navigate_created(&session_path(session_id), replace_created.clone());
        }
    });

    let navigate_missing = navigate;
    Effect::new(move || {
        if let Some(session_id) = sessions.with(|s| s.missing_session_id) {
            sessions.update(|s| s.missing_session_id = None);
            log::debug!("chat: leaving missing session {session_id}");
            navigate_missing("/", replace.clone());
        }
    });

    on_cleanup(move || client.finish_reveal());

    let title = move || {
        chat.with(|c| match (c.title(), c.session_id()) {
            (Some(title), _) => title.to_owned(),
            (None, Some(id)) => format!("Chat #{id}"),
            (None, None) => "New chat".to_owned(),
        })
    };

    let identity = move || {
        auth.with(|a| match &a.user {
            Some(user) if !user.name.is_empty() => user.name.clone(),
            Some(user) => user.id.clone(),
            None => "Not signed in".to_owned(),
        })
    };

    view! {
        <div class="chat-page">
            <aside class="chat-page__sidebar">
                <SessionList/>
            </aside>
            <main class="chat-page__main">
                <header class="chat-page__header toolbar">
                    <span class="toolbar__title">{title}</span>
                    <span class="toolbar__spacer"></span>
                    <span class="toolbar__self">{identity}</span>
                </header>
                <ErrorBanner/>
                <MessageList/>
                <PromptInput/>
            </main>
        </div>
    }
}
