//! Wire DTOs for the conversation backend.
//!
//! DESIGN
//! ======
//! Decoding is lenient on purpose at the message level: a message with a
//! missing or mistyped field is defaulted, and a list item that is not an
//! object is skipped, so one bad entry never blanks a conversation. The
//! session id itself is required.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::state::timeline::{Message, Sender};

/// Body of `POST /chat/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendPromptRequest {
    pub content: String,
    /// `None` asks the backend to create a new session.
    pub session_id: Option<i64>,
}

/// A chat session with its full message history.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionRecord {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// ISO 8601 creation timestamp, if present.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_messages")]
    pub messages: Vec<WireMessage>,
}

impl SessionRecord {
    #[must_use]
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Title for list and header display: the server title when non-blank,
    /// otherwise a numbered fallback.
    #[must_use]
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_owned(),
            _ => format!("Chat #{}", self.id),
        }
    }
}

/// A message as sent by the backend. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WireMessage {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub timestamp: Option<String>,
}

impl WireMessage {
    /// Convert to a timeline message, filling gaps with safe defaults:
    /// `fallback_id` for a missing id, `received_at` for a missing or
    /// unparseable timestamp, empty content, assistant sender.
    pub fn into_message(self, fallback_id: impl FnOnce() -> i64, received_at: OffsetDateTime) -> Message {
        let timestamp = self.timestamp.as_deref().and_then(parse_timestamp).unwrap_or(received_at);
        Message {
            id: self.id.unwrap_or_else(fallback_id),
            sender: Sender::from_wire(self.sender.as_deref()),
            content: self.content.unwrap_or_default(),
            timestamp,
        }
    }
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

/// Parse an RFC 3339 timestamp, or an ISO 8601 one without offset (read as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(raw, &Iso8601::DEFAULT))
        .or_else(|_| PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc))
        .ok()
}

fn deserialize_lenient_messages<'de, D>(deserializer: D) -> Result<Vec<WireMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|item| serde_json::from_value::<WireMessage>(item).ok())
        .collect())
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(i64_from_value(&value))
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    i64_from_value(&value).ok_or_else(|| D::Error::custom("expected integer-compatible number"))
}

fn i64_from_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Some(float as i64);
            }
            None
        }
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
