//! Browser driver for the chat controller.
//!
//! `ChatClient` owns no chat logic. It turns UI events into controller
//! calls, performs the HTTP round trips they ask for, and runs the reveal
//! timer. Everything it does is a thin shell around `ChatState` methods so
//! the behavior stays testable without a browser.
//!
//! All I/O is gated behind `#[cfg(feature = "hydrate")]`; on the server the
//! entry points only update state.
//!
//! Every backend call needs the caller identity for `X-User-ID`. Without
//! one, saved sessions are not fetched at all; the chat page selects the
//! routed session again once someone signs in.
//!
//! ERROR HANDLING
//! ==============
//! Request failures are handed to the controller, which turns them into the
//! chat banner. Sidebar failures land in `SessionsState::error`.

#[cfg(test)]
#[path = "chat_client_test.rs"]
mod chat_client_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, SendRejected, SessionSelection};
use crate::state::sessions::SessionsState;

#[cfg(feature = "hydrate")]
use crate::net::api;
#[cfg(feature = "hydrate")]
use crate::state::chat::{LoadOutcome, LoadTicket, PendingSend, SendOutcome};
#[cfg(feature = "hydrate")]
use crate::state::typing::{RevealTicket, TickOutcome};
#[cfg(feature = "hydrate")]
use std::cell::RefCell;

#[cfg(feature = "hydrate")]
thread_local! {
    /// The one live reveal timer, tagged with the animator run it drives.
    static REVEAL_TIMER: RefCell<Option<(u64, gloo_timers::callback::Interval)>> = const { RefCell::new(None) };
}

/// True when selecting `session_id` has to wait for an identity: only saved
/// sessions are fetched, and every fetch carries `X-User-ID`.
#[must_use]
pub fn selection_waits_for_identity(session_id: Option<i64>, user_id: Option<&str>) -> bool {
    session_id.is_some() && user_id.is_none_or(|id| id.trim().is_empty())
}

/// Shared handles the chat UI needs to reach the backend.
#[derive(Clone, Copy)]
pub struct ChatClient {
    config: StoredValue<ClientConfig>,
    pub auth: RwSignal<AuthState>,
    pub chat: RwSignal<ChatState>,
    pub sessions: RwSignal<SessionsState>,
}

impl ChatClient {
    pub fn new(
        config: ClientConfig,
        auth: RwSignal<AuthState>,
        chat: RwSignal<ChatState>,
        sessions: RwSignal<SessionsState>,
    ) -> Self {
        Self { config: StoredValue::new(config), auth, chat, sessions }
    }

    #[must_use]
    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    fn user_id(self) -> Option<String> {
        self.auth.with_untracked(|a| a.user_id().map(str::to_owned))
    }

    /// Send `prompt` in the active session.
    ///
    /// The optimistic message is applied before this returns; the request
    /// itself completes in the background.
    ///
    /// # Errors
    ///
    /// Returns the controller's `SendRejected` when the prompt is blank, a
    /// send or reveal is in progress, or no user is signed in.
    pub fn send(self, prompt: &str) -> Result<(), SendRejected> {
        let user_id = self.user_id();
        let now = time::OffsetDateTime::now_utc();
        let pending = self
            .chat
            .try_update(|c| c.begin_send(prompt, user_id.as_deref(), now))
            .unwrap_or(Err(SendRejected::Busy))?;

        log::debug!("chat: sending prompt ({} chars, session {:?})", pending.request.content.len(), pending.request.session_id);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(self.run_send(pending));
        #[cfg(not(feature = "hydrate"))]
        let _ = pending;
        Ok(())
    }

    /// Point the chat view at `session_id` (`None` for a new chat) and
    /// fetch it when needed. A saved session is left unselected until an
    /// identity is present.
    pub fn select(self, session_id: Option<i64>) {
        let user_id = self.user_id();
        if selection_waits_for_identity(session_id, user_id.as_deref()) {
            log::debug!("chat: session {session_id:?} waits for sign-in");
            return;
        }
        let Some(selection) = self.chat.try_update(|c| c.select_session(session_id)) else {
            return;
        };
        match selection {
            SessionSelection::Unchanged => {}
            SessionSelection::Cleared => stop_reveal(),
            SessionSelection::Load(ticket) => {
                stop_reveal();
                let Some(user_id) = user_id else {
                    return;
                };
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(self.run_load(ticket, user_id));
                #[cfg(not(feature = "hydrate"))]
                let _ = (ticket, user_id);
            }
        }
    }

    /// Re-fetch the active session after a load error.
    pub fn reload(self) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let Some(Some(ticket)) = self.chat.try_update(ChatState::reload) else {
            return;
        };
        stop_reveal();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(self.run_load(ticket, user_id));
        #[cfg(not(feature = "hydrate"))]
        let _ = (ticket, user_id);
    }

    /// Reset the chat and the sidebar after the user signs out.
    pub fn sign_out(self) {
        stop_reveal();
        self.chat.update(ChatState::sign_out);
        self.sessions.update(SessionsState::clear);
    }

    /// Finish any running reveal at once. Used when the chat view unmounts.
    pub fn finish_reveal(self) {
        stop_reveal();
        self.chat.try_update(ChatState::cancel_animation);
    }

    /// Fetch the newest sessions for the sidebar.
    pub fn refresh_sessions(self) {
        let Some(user_id) = self.user_id() else {
            self.sessions.update(SessionsState::clear);
            return;
        };
        let Some(seq) = self.sessions.try_update(SessionsState::request_refresh) else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let config = self.config();
            match api::fetch_sessions(&config, &user_id, 0, config.session_page_size).await {
                Ok(records) => {
                    self.sessions.update(|s| {
                        s.apply_list(seq, &records);
                    });
                }
                Err(e) => {
                    log::warn!("sessions: list fetch failed: {e}");
                    self.sessions.update(|s| {
                        s.apply_error(seq, e.to_string());
                    });
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_id, seq);
    }

    #[cfg(feature = "hydrate")]
    async fn run_send(self, pending: PendingSend) {
        let config = self.config();
        let response = api::send_prompt(&config, &pending.user_id, &pending.request).await;
        let now = time::OffsetDateTime::now_utc();
        let outcome = self.chat.try_update(|c| match response {
            Ok(record) => c.apply_send_response(&pending, record, now),
            Err(e) => c.apply_send_failure(&pending, e),
        });

        let Some(SendOutcome::Applied { session_id, created_session, reveal }) = outcome else {
            return;
        };
        if let Some(ticket) = reveal {
            start_reveal(self.chat, ticket, config.typing_interval_ms);
        }
        if created_session {
            log::debug!("chat: session {session_id} created");
            self.sessions.update(|s| s.created_session_id = Some(session_id));
            self.refresh_sessions();
        }
    }

    #[cfg(feature = "hydrate")]
    async fn run_load(self, ticket: LoadTicket, user_id: String) {
        let config = self.config();
        let response = api::fetch_session(&config, &user_id, ticket.session_id).await;
        let now = time::OffsetDateTime::now_utc();
        let outcome = self.chat.try_update(|c| match response {
            Ok(record) => c.apply_load_response(&ticket, record, now),
            Err(e) => c.apply_load_failure(&ticket, e),
        });
        if outcome == Some(LoadOutcome::ResetToNew) {
            stop_reveal();
            self.sessions.update(|s| s.missing_session_id = Some(ticket.session_id));
            self.refresh_sessions();
        }
    }
}

#[cfg(feature = "hydrate")]
fn start_reveal(chat: RwSignal<ChatState>, ticket: RevealTicket, interval_ms: u32) {
    stop_reveal();
    let interval = gloo_timers::callback::Interval::new(interval_ms.max(1), move || {
        let outcome = chat.try_update(|c| c.tick_animation(ticket)).unwrap_or(TickOutcome::Inert);
        if outcome != TickOutcome::Continue {
            release_reveal_timer(ticket.run);
        }
    });
    REVEAL_TIMER.with(|slot| *slot.borrow_mut() = Some((ticket.run, interval)));
}

/// Drop the timer for `run` once the current callback has returned.
#[cfg(feature = "hydrate")]
fn release_reveal_timer(run: u64) {
    gloo_timers::callback::Timeout::new(0, move || {
        let released = REVEAL_TIMER.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.as_ref().is_some_and(|(current, _)| *current == run) { slot.take() } else { None }
        });
        drop(released);
    })
    .forget();
}

/// Cancel the reveal timer, if any. Must not be called from its own callback.
fn stop_reveal() {
    #[cfg(feature = "hydrate")]
    {
        let released = REVEAL_TIMER.with(|slot| slot.borrow_mut().take());
        drop(released);
    }
}
