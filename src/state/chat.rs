//! Chat session controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ChatState` is the single owner of the active session's timeline. Every
//! user action and every async completion (HTTP response, reveal tick) is a
//! synchronous method call here; the browser driver in
//! `net::chat_client` only performs the I/O and feeds results back in.
//!
//! DESIGN
//! ======
//! Async work captures the session generation when it starts and hands it
//! back on completion. Results whose generation is no longer current are
//! dropped before they can touch the timeline or the busy flag, so a slow
//! response for session A can never land in session B.
//!
//! ERROR HANDLING
//! ==============
//! Failures become a single dismissible `ChatError` banner. Nothing here
//! panics or propagates past the chat view.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use time::OffsetDateTime;

use super::session_guard::{Generation, SessionGuard};
use super::timeline::{Message, Sender, TempIds, Timeline};
use super::typing::{RevealTicket, TickOutcome, TypingAnimator};
use crate::net::api::ApiError;
use crate::net::types::{SendPromptRequest, SessionRecord, WireMessage};

/// Banner shown inside the chat view.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("Sign in to send messages.")]
    Unauthenticated,

    #[error("Message not sent: {0}")]
    Send(ApiError),

    #[error("That conversation no longer exists. Starting a new chat.")]
    SessionNotFound,

    #[error("Could not load the conversation: {0}")]
    Load(ApiError),
}

/// Why `begin_send` refused to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendRejected {
    EmptyPrompt,
    /// A send is outstanding or a reply is still being revealed.
    Busy,
    Unauthenticated,
}

/// A send that has been applied optimistically and must be issued once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    pub temp_id: i64,
    pub user_id: String,
    pub generation: Generation,
    pub request: SendPromptRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The server's message list is installed.
    Applied {
        session_id: i64,
        /// The send created the session; the session list should refresh.
        created_session: bool,
        /// Present when the trailing assistant reply is being revealed.
        reveal: Option<RevealTicket>,
    },
    /// The optimistic message was removed and the banner raised.
    RolledBack,
    /// The session changed while the request was in flight.
    Discarded,
}

/// A session fetch the driver must perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub session_id: i64,
    pub generation: Generation,
    /// Blank the timeline if the fetch fails, rather than keeping what is shown.
    pub reset_on_error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSelection {
    /// Already the active session; nothing to do.
    Unchanged,
    /// Switched to a new, unsaved chat. No request needed.
    Cleared,
    Load(LoadTicket),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The session does not exist; the controller is back on a new chat.
    ResetToNew,
    /// Banner raised; timeline kept or blanked per the ticket.
    Failed,
    Discarded,
}

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    session_id: Option<i64>,
    title: Option<String>,
    timeline: Timeline,
    sending: bool,
    loading: bool,
    error: Option<ChatError>,
    guard: SessionGuard,
    animator: TypingAnimator,
    temp_ids: TempIds,
}

impl ChatState {
    // =============================================================
    // Read access
    // =============================================================

    /// Active session id; `None` for an unsaved new chat.
    #[must_use]
    pub fn session_id(&self) -> Option<i64> {
        self.session_id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.timeline.messages()
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// True while a send is outstanding, a reply is being revealed, or a
    /// session load is in flight. During a load the timeline may still show
    /// the previous session, so nothing may be sent into it.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.sending || self.loading || self.animator.is_active()
    }

    /// Id of the message currently being revealed.
    #[must_use]
    pub fn revealing_message_id(&self) -> Option<i64> {
        self.animator.target_id()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ChatError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.guard.current()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // =============================================================
    // Session loading
    // =============================================================

    /// Point the controller at `session_id` (or a new chat for `None`).
    ///
    /// Reselecting the active session is a no-op, so the router echoing
    /// back an id that a send just created does not interrupt the reveal,
    /// and routing to the new-chat path after a reset keeps the banner.
    pub fn select_session(&mut self, session_id: Option<i64>) -> SessionSelection {
        if session_id == self.session_id {
            return SessionSelection::Unchanged;
        }

        let generation = self.switch_generation();
        self.session_id = session_id;
        self.title = None;

        match session_id {
            None => {
                self.timeline.clear();
                self.loading = false;
                log::debug!("chat: new session selected ({generation})");
                SessionSelection::Cleared
            }
            Some(id) => {
                self.loading = true;
                log::debug!("chat: loading session {id} ({generation})");
                SessionSelection::Load(LoadTicket { session_id: id, generation, reset_on_error: true })
            }
        }
    }

    /// Re-fetch the active session. The newest request wins; earlier
    /// in-flight loads become stale. Refused while a send is outstanding.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        let session_id = self.session_id?;
        if self.sending {
            return None;
        }
        let generation = self.switch_generation();
        self.loading = true;
        Some(LoadTicket { session_id, generation, reset_on_error: false })
    }

    pub fn apply_load_response(&mut self, ticket: &LoadTicket, record: SessionRecord, now: OffsetDateTime) -> LoadOutcome {
        if !self.guard.is_current(ticket.generation) {
            log::debug!("chat: dropping stale load of session {} ({})", ticket.session_id, ticket.generation);
            return LoadOutcome::Discarded;
        }

        // A loaded session never animates; its content is already final.
        self.animator.discard();
        self.install_record(record, now);
        self.loading = false;
        LoadOutcome::Applied
    }

    pub fn apply_load_failure(&mut self, ticket: &LoadTicket, error: ApiError) -> LoadOutcome {
        if !self.guard.is_current(ticket.generation) {
            log::debug!("chat: dropping stale load failure for session {} ({})", ticket.session_id, ticket.generation);
            return LoadOutcome::Discarded;
        }

        self.loading = false;
        if error == ApiError::NotFound {
            log::warn!("chat: session {} not found, resetting to new chat", ticket.session_id);
            self.switch_generation();
            self.timeline.clear();
            self.session_id = None;
            self.title = None;
            self.error = Some(ChatError::SessionNotFound);
            return LoadOutcome::ResetToNew;
        }

        log::warn!("chat: loading session {} failed: {error}", ticket.session_id);
        if ticket.reset_on_error {
            self.animator.cancel(&mut self.timeline);
            self.timeline.clear();
        }
        self.error = Some(ChatError::Load(error));
        LoadOutcome::Failed
    }

    // =============================================================
    // Sending
    // =============================================================

    /// Validate and optimistically apply a prompt.
    ///
    /// # Errors
    ///
    /// Returns `SendRejected` without touching the timeline when the prompt
    /// is blank, the controller is busy (including while a session loads),
    /// or no identity is present. The
    /// unauthenticated case also raises the banner.
    pub fn begin_send(
        &mut self,
        prompt: &str,
        user_id: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<PendingSend, SendRejected> {
        let content = prompt.trim();
        if content.is_empty() {
            return Err(SendRejected::EmptyPrompt);
        }
        if self.is_busy() {
            log::debug!("chat: send rejected, controller busy");
            return Err(SendRejected::Busy);
        }
        let Some(user_id) = user_id.map(str::trim).filter(|id| !id.is_empty()) else {
            self.error = Some(ChatError::Unauthenticated);
            return Err(SendRejected::Unauthenticated);
        };

        let temp_id = self.temp_ids.next(now);
        self.timeline.append(Message {
            id: temp_id,
            sender: Sender::User,
            content: content.to_owned(),
            timestamp: now,
        });
        self.sending = true;
        self.error = None;

        Ok(PendingSend {
            temp_id,
            user_id: user_id.to_owned(),
            generation: self.guard.current(),
            request: SendPromptRequest { content: content.to_owned(), session_id: self.session_id },
        })
    }

    /// Reconcile with the server's authoritative session.
    pub fn apply_send_response(&mut self, pending: &PendingSend, record: SessionRecord, now: OffsetDateTime) -> SendOutcome {
        if !self.guard.is_current(pending.generation) {
            log::debug!("chat: dropping stale send response ({})", pending.generation);
            return SendOutcome::Discarded;
        }

        self.sending = false;
        let session_id = record.id;
        let created_session = self.session_id != Some(session_id);
        self.install_record(record, now);

        let reveal = match self.timeline.last() {
            Some(last) if last.sender == Sender::Assistant => {
                let (target, content) = (last.id, last.content.clone());
                let generation = self.guard.current();
                Some(self.animator.start(target, content, generation, &mut self.timeline))
            }
            _ => None,
        };

        SendOutcome::Applied { session_id, created_session, reveal }
    }

    /// Roll back the optimistic message for a failed send.
    pub fn apply_send_failure(&mut self, pending: &PendingSend, error: ApiError) -> SendOutcome {
        if !self.guard.is_current(pending.generation) {
            log::debug!("chat: dropping stale send failure ({})", pending.generation);
            return SendOutcome::Discarded;
        }

        log::warn!("chat: send failed: {error}");
        self.timeline.remove_by_id(pending.temp_id);
        self.sending = false;
        self.error = Some(ChatError::Send(error));
        SendOutcome::RolledBack
    }

    // =============================================================
    // Reveal
    // =============================================================

    pub fn tick_animation(&mut self, ticket: RevealTicket) -> TickOutcome {
        if !self.guard.is_current(ticket.generation) {
            return TickOutcome::Inert;
        }
        self.animator.tick(ticket, &mut self.timeline)
    }

    /// Finish any reveal immediately, showing the full text.
    pub fn cancel_animation(&mut self) -> bool {
        self.animator.cancel(&mut self.timeline).is_some()
    }

    // =============================================================
    // Identity
    // =============================================================

    /// Forget everything after the user signs out.
    pub fn sign_out(&mut self) {
        self.switch_generation();
        self.timeline.clear();
        self.session_id = None;
        self.title = None;
        self.loading = false;
        self.error = None;
    }

    // =============================================================
    // Internals
    // =============================================================

    /// Invalidate every outstanding async result and settle the view:
    /// the reveal is finalized and the busy flag released.
    fn switch_generation(&mut self) -> Generation {
        let generation = self.guard.advance();
        self.animator.cancel(&mut self.timeline);
        self.sending = false;
        self.error = None;
        generation
    }

    fn install_record(&mut self, record: SessionRecord, now: OffsetDateTime) {
        self.session_id = Some(record.id);
        self.title = record.title.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        let messages = self.messages_from_wire(record.messages, now);
        self.timeline.replace_all(messages);
    }

    fn messages_from_wire(&mut self, wire: Vec<WireMessage>, now: OffsetDateTime) -> Vec<Message> {
        let temp_ids = &mut self.temp_ids;
        wire.into_iter().map(|m| m.into_message(|| temp_ids.next(now), now)).collect()
    }
}
