//! Page lifecycle
//!
//! Runs the enhancers and polling clients once the document is parsed, and tears the
//! session down when the page is left for good.

use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{DocumentReadyState, PageTransitionEvent};

use crate::dom;
use crate::enhancers;
use crate::polling;
use crate::state::{self, PageSession};

/// Wire `session` to the page
pub fn mount(session: &Rc<PageSession>) {
    let Some(document) = dom::document() else {
        tracing::warn!("No document, nothing to enhance");
        return;
    };

    if let Some(window) = dom::window() {
        session.listen(&window, "pagehide", |event| {
            // Pages kept in the back/forward cache come back with their timers intact
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .map(|e| e.persisted())
                .unwrap_or(false);
            if persisted {
                return;
            }
            // Teardown drops this listener, so run it after the handler returns
            wasm_bindgen_futures::spawn_local(async {
                state::uninstall();
            });
        });
    }

    if document.ready_state() == DocumentReadyState::Loading {
        let ready = Rc::clone(session);
        session.listen(&document, "DOMContentLoaded", move |_| run(&ready));
    } else {
        run(session);
    }
}

/// Enhance the page and start polling
pub fn run(session: &Rc<PageSession>) {
    if session.is_closed() {
        return;
    }
    enhancers::run_all(session);
    polling::start_all(session);
    tracing::info!(locale = %session.locale(), "Page ready");
}
