//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat surface and the session sidebar, reading
//! shared state from Leptos context and routing actions through
//! `ChatClient`.

pub mod error_banner;
pub mod message_list;
pub mod prompt_input;
pub mod session_list;
