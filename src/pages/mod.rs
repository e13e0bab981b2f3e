//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The chat page owns route-scoped orchestration (session selection,
//! post-send navigation, teardown) and delegates rendering to `components`.

pub mod chat;
