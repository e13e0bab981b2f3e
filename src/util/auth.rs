//! Identity glue shared by the app root.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat must be forgotten as soon as the user signs out. Once an
//! identity appears, the sidebar is fetched and the routed session, which
//! could not be loaded without one, is selected.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::chat_client::ChatClient;

/// How identity changed between two observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityTransition {
    Unchanged,
    SignedIn,
    SignedOut,
}

/// Classify a change from `prev` to `next`, where `None` for `prev` means
/// this is the first observation.
#[must_use]
pub fn identity_transition(prev: Option<bool>, next: bool) -> IdentityTransition {
    match (prev, next) {
        (Some(true), false) => IdentityTransition::SignedOut,
        (Some(false) | None, true) => IdentityTransition::SignedIn,
        _ => IdentityTransition::Unchanged,
    }
}

/// Reset the chat on sign-out; on sign-in load the sidebar and the session
/// named by `route_session`.
pub fn install_identity_watch(client: ChatClient, route_session: Memo<Option<i64>>) {
    Effect::new(move |prev: Option<bool>| {
        let signed_in = client.auth.with(|a| a.user_id().is_some());
        match identity_transition(prev, signed_in) {
            IdentityTransition::SignedOut => {
                log::debug!("auth: signed out, clearing chat");
                client.sign_out();
            }
            IdentityTransition::SignedIn => {
                client.refresh_sessions();
                client.select(route_session.get_untracked());
            }
            IdentityTransition::Unchanged => {}
        }
        signed_in
    });
}
