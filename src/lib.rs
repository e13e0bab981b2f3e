//! # dora-chat
//!
//! Leptos + WASM chat client for a conversational backend.
//!
//! The crate holds the session controller (`state`), the REST client and
//! its browser driver (`net`), and the pages and components that render a
//! conversation. Controller logic is plain Rust and tested natively; only
//! `net::chat_client` and the view layer touch the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
