//! Ordered message timeline for the active chat session.
//!
//! DESIGN
//! ======
//! The timeline is plain data owned by `ChatState`; the view observes it
//! through the chat signal. Ids are unique at every instant and order is
//! insertion order (oldest first).

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use time::OffsetDateTime;

/// Who authored a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sender {
    User,
    #[default]
    Assistant,
}

impl Sender {
    /// Map a backend sender label. The backend stores assistant replies as
    /// `"llm"`; unknown or missing labels render as assistant output.
    #[must_use]
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(label) if label.eq_ignore_ascii_case("user") => Self::User,
            _ => Self::Assistant,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Server id once persisted; negative temporary id while optimistic.
    pub id: i64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn is_optimistic(&self) -> bool {
        is_temp_id(self.id)
    }
}

/// True for ids allocated on the client; the backend only issues positive ids.
#[must_use]
pub fn is_temp_id(id: i64) -> bool {
    id < 0
}

/// Allocates temporary ids for optimistic messages.
///
/// Ids are the negated wall-clock time in milliseconds, bumped so they are
/// strictly decreasing even when two are taken in the same millisecond.
#[derive(Clone, Debug, Default)]
pub struct TempIds {
    last: i64,
}

impl TempIds {
    pub fn next(&mut self, now: OffsetDateTime) -> i64 {
        let millis = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
        let candidate = millis.max(1);
        let next = if candidate > self.last { candidate } else { self.last.saturating_add(1) };
        self.last = next;
        -next
    }
}

/// Insertion-ordered message list with unique ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    messages: Vec<Message>,
}

impl Timeline {
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append at the end. Returns `false` and leaves the timeline untouched
    /// if a message with the same id is already present.
    pub fn append(&mut self, message: Message) -> bool {
        if self.get(message.id).is_some() {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Replace every message at once. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        let mut next: Vec<Message> = Vec::with_capacity(messages.len());
        for message in messages {
            if next.iter().all(|m| m.id != message.id) {
                next.push(message);
            }
        }
        self.messages = next;
    }

    /// Update one message's content in place. No-op when the id is absent,
    /// e.g. after a later `replace_all` superseded it.
    pub fn patch_content(&mut self, id: i64, content: &str) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        if message.content != content {
            content.clone_into(&mut message.content);
        }
        true
    }

    /// Remove exactly one message by id.
    pub fn remove_by_id(&mut self, id: i64) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
