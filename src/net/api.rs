//! REST API helpers for the conversation backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: stubs returning
//! `ApiError::Unavailable`, since these endpoints are only meaningful in the
//! browser.
//!
//! Every request carries the caller identity in `X-User-ID`.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as `ApiError` so the chat controller can tell a
//! missing session (404) apart from transport and server faults.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::SessionRecord;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;
use crate::config::ClientConfig;

/// Header carrying the caller identity on every backend request.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered 404 for the requested session.
    #[error("session not found")]
    NotFound,

    /// Any other non-success status.
    #[error("{}", status_message(*status, detail.as_deref()))]
    Status { status: u16, detail: Option<String> },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Parse(String),

    /// HTTP is not available in this build (SSR/native).
    #[error("not available on server")]
    Unavailable,
}

fn status_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("request failed ({status}): {detail}"),
        None => format!("request failed: {status}"),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn chat_endpoint(base: &str) -> String {
    format!("{base}/chat/")
}

#[cfg(any(test, feature = "hydrate"))]
fn session_endpoint(base: &str, session_id: i64) -> String {
    format!("{base}/sessions/{session_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn sessions_endpoint(base: &str, skip: u32, limit: u32) -> String {
    format!("{base}/sessions/?skip={skip}&limit={limit}")
}

/// Pull a human-readable reason out of an error body.
///
/// FastAPI sends `{"detail": "..."}` for `HTTPException`s and
/// `{"detail": [{"msg": ...}]}` for validation failures.
#[cfg(any(test, feature = "hydrate"))]
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        }
        serde_json::Value::Array(items) => {
            let parts = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Map a non-success status to an error, treating 404 as `NotFound` only
/// where the caller says a missing resource is meaningful.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str, not_found_is_missing: bool) -> ApiError {
    if status == 404 && not_found_is_missing {
        return ApiError::NotFound;
    }
    ApiError::Status { status, detail: error_detail(body) }
}

#[cfg(feature = "hydrate")]
async fn decode_response<T>(resp: gloo_net::http::Response, not_found_is_missing: bool) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(status_error(resp.status(), &body, not_found_is_missing));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

/// Post a prompt via `POST /chat/`. Returns the full, authoritative session.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, non-success status, or an
/// undecodable body. A 404 (unknown `session_id`) maps to `NotFound`.
pub async fn send_prompt(
    config: &ClientConfig,
    user_id: &str,
    request: &super::types::SendPromptRequest,
) -> Result<SessionRecord, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = chat_endpoint(&config.api_base_url);
        let resp = gloo_net::http::Request::post(&url)
            .header(USER_ID_HEADER, user_id)
            .json(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(resp, true).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, user_id, request);
        Err(ApiError::Unavailable)
    }
}

/// Fetch one session with its messages via `GET /sessions/{id}`.
///
/// # Errors
///
/// `ApiError::NotFound` when the backend answers 404; other variants as for
/// [`send_prompt`].
pub async fn fetch_session(config: &ClientConfig, user_id: &str, session_id: i64) -> Result<SessionRecord, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = session_endpoint(&config.api_base_url, session_id);
        let resp = gloo_net::http::Request::get(&url)
            .header(USER_ID_HEADER, user_id)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(resp, true).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, user_id, session_id);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the newest sessions via `GET /sessions/?skip&limit`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, non-success status, or an
/// undecodable body.
pub async fn fetch_sessions(
    config: &ClientConfig,
    user_id: &str,
    skip: u32,
    limit: u32,
) -> Result<Vec<SessionRecord>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = sessions_endpoint(&config.api_base_url, skip, limit);
        let resp = gloo_net::http::Request::get(&url)
            .header(USER_ID_HEADER, user_id)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(resp, false).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, user_id, skip, limit);
        Err(ApiError::Unavailable)
    }
}
