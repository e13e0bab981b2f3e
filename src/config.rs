//! Client configuration resolved from build-time variables.
//!
//! The browser has no process environment, so values are baked in with
//! `option_env!` when the WASM bundle is built. Parsing goes through a
//! key lookup so it can be exercised without touching the real environment.

use crate::state::typing::DEFAULT_TYPING_INTERVAL_MS;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Matches the backend's default page size for `GET /sessions/`.
pub const DEFAULT_SESSION_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    /// Milliseconds between revealed characters. Always at least 1.
    pub typing_interval_ms: u32,
    /// Sessions fetched per sidebar page.
    pub session_page_size: u32,
    /// Identity sent as `X-User-ID` until the host signs someone in.
    pub user_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            session_page_size: DEFAULT_SESSION_PAGE_SIZE,
            user_id: None,
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `CHAT_API_BASE_URL`: default `http://localhost:8000`
    /// - `CHAT_TYPING_INTERVAL_MS`: default 15
    /// - `CHAT_SESSION_PAGE_SIZE`: default 10
    /// - `CHAT_USER_ID`: initial signed-in identity, default none
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "CHAT_API_BASE_URL" => option_env!("CHAT_API_BASE_URL"),
                "CHAT_TYPING_INTERVAL_MS" => option_env!("CHAT_TYPING_INTERVAL_MS"),
                "CHAT_SESSION_PAGE_SIZE" => option_env!("CHAT_SESSION_PAGE_SIZE"),
                "CHAT_USER_ID" => option_env!("CHAT_USER_ID"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup. Blank or unparseable
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("CHAT_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let typing_interval_ms = parse_u32(lookup("CHAT_TYPING_INTERVAL_MS"), DEFAULT_TYPING_INTERVAL_MS).max(1);
        let session_page_size = parse_u32(lookup("CHAT_SESSION_PAGE_SIZE"), DEFAULT_SESSION_PAGE_SIZE).max(1);

        let user_id = lookup("CHAT_USER_ID").map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let config = Self { api_base_url, typing_interval_ms, session_page_size, user_id };
        log::debug!(
            "client config: api_base_url={} typing_interval_ms={} session_page_size={} user_id_set={}",
            config.api_base_url,
            config.typing_interval_ms,
            config.session_page_size,
            config.user_id.is_some()
        );
        config
    }
}

fn parse_u32(raw: Option<String>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
