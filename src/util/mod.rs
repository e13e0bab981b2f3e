//! Utility helpers shared across chat UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep rendering and identity glue out of page and
//! component code so it can be tested natively.

pub mod auth;
pub mod format;
pub mod markdown;
