//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `chat`, `sessions`) so components can
//! depend on small focused models. `chat` composes the timeline, the typing
//! animator and the session guard into one controller; none of these modules
//! touch the browser, so they are tested natively.

pub mod auth;
pub mod chat;
pub mod session_guard;
pub mod sessions;
pub mod timeline;
pub mod typing;
