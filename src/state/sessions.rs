//! Sidebar list of the user's recent chat sessions.

#[cfg(test)]
#[path = "sessions_test.rs"]
mod sessions_test;

use time::OffsetDateTime;

use crate::net::types::SessionRecord;

/// One row in the session list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: i64,
    pub title: String,
    pub created_at: Option<OffsetDateTime>,
    pub message_count: usize,
}

impl From<&SessionRecord> for SessionSummary {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.id,
            title: record.display_title(),
            created_at: record.created_at(),
            message_count: record.messages.len(),
        }
    }
}

/// Shared session list state. Each fetch takes a new `refresh_seq`; a
/// response for an older sequence is ignored.
///
/// `created_session_id` and `missing_session_id` are one-shot route
/// requests for the chat page: open a session a send just created, or
/// leave one the backend no longer knows.
#[derive(Clone, Debug, Default)]
pub struct SessionsState {
    pub items: Vec<SessionSummary>,
    pub loading: bool,
    pub refresh_seq: u64,
    pub error: Option<String>,
    pub created_session_id: Option<i64>,
    pub missing_session_id: Option<i64>,
}

impl SessionsState {
    /// Request a fresh list. Returns the sequence the response must carry.
    pub fn request_refresh(&mut self) -> u64 {
        self.refresh_seq = self.refresh_seq.wrapping_add(1);
        self.loading = true;
        self.refresh_seq
    }

    /// Install a fetched list, newest first. Returns false when `seq` is stale.
    pub fn apply_list(&mut self, seq: u64, records: &[SessionRecord]) -> bool {
        if seq != self.refresh_seq {
            return false;
        }
        let mut items = records.iter().map(SessionSummary::from).collect::<Vec<_>>();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items.dedup_by_key(|item| item.id);
        self.items = items;
        self.loading = false;
        self.error = None;
        true
    }

    /// Record a failed fetch, keeping the previous list. Returns false when stale.
    pub fn apply_error(&mut self, seq: u64, message: String) -> bool {
        if seq != self.refresh_seq {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_session_id = None;
        self.missing_session_id = None;
        self.error = None;
        self.loading = false;
        self.refresh_seq = self.refresh_seq.wrapping_add(1);
    }
}
