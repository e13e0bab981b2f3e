//! Networking modules for the conversation backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `chat_client` drives them from UI events and
//! feeds results back into the chat controller, and `types` defines the
//! wire schema.

pub mod api;
pub mod chat_client;
pub mod types;
