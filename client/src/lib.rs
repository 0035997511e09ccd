//! # client
//!
//! Leptos + WASM frontend for the property-management app.
//!
//! This crate contains the session gate, the searchable record picker, the
//! backend client (auth + data over HTTP), and the auth-flow and main-flow
//! screens. The `server` crate renders `app::shell` and serves the hydration
//! bundle built from this crate with the `hydrate` feature.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point called by the hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
