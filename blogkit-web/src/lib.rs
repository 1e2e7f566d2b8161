//! Blogkit Page Bundle
//!
//! WebAssembly bundle loaded by every page of the blog. It enhances the server-rendered
//! markup and keeps a couple of widgets live.
//!
//! # Features
//!
//! - Alert auto-dismiss, submit guard, lazy images, tooltips
//! - Scroll-to-top button and editor character counter (Leptos)
//! - Unread private chat badge polling
//! - Weather refresh buttons
//! - `BlogUtils` helpers for inline page scripts
//!
//! # Architecture
//!
//! Behavior lives in the platform-independent `blogkit` crate; this crate binds it to the
//! DOM with `web-sys`, talks HTTP with `gloo-net` and schedules with `gloo-timers`. All
//! resources of a page view belong to one [`state::PageSession`].

use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod bootstrap;
pub mod components;
pub mod config;
pub mod dom;
pub mod enhancers;
pub mod logging;
pub mod polling;
pub mod state;
pub mod timers;
pub mod utils;

pub use state::PageSession;
pub use utils::BlogUtils;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() {
    // Better panic messages in the console
    console_error_panic_hook::set_once();

    let (config, problem) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (blogkit::Config::default(), Some(e)),
    };
    logging::init(&config.logging.level);
    if let Some(e) = problem {
        tracing::warn!(error = %e, "Ignoring invalid page config");
    }

    if let Err(e) = utils::install_global() {
        tracing::error!(error = ?e, "Failed to publish window.BlogUtils");
    }

    let session = PageSession::new(config);
    state::install(session.clone());
    app::mount(&session);
}
