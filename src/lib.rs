//! # jungle-console
//!
//! Leptos + WASM administrative console for the Jungle Planet zoo backend.
//!
//! This crate contains the session accessor, the REST client and push-channel
//! plumbing, the per-resource CRUD page controller, and the Leptos pages and
//! components that render them. Browser-only glue is gated behind the `csr`
//! feature; everything else builds and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// WASM entry point: install the panic hook and console logger, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
