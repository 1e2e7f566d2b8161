//! DOM Enhancers
//!
//! Progressive enhancement of the server-rendered markup. Each enhancer runs once when the
//! document is ready and does nothing when its selector matches nothing.

pub mod alerts;
pub mod forms;
pub mod lazy_images;
pub mod polish;
pub mod tooltips;

use std::rc::Rc;

use crate::components::{char_counter, scroll_top};
use crate::state::PageSession;

pub fn run_all(session: &Rc<PageSession>) {
    alerts::auto_dismiss(session);
    forms::guard_submissions(session);

    if let Err(e) = scroll_top::mount(session) {
        tracing::warn!(error = ?e, "Scroll-to-top button not mounted");
    }
    if let Err(e) = lazy_images::observe(session) {
        tracing::warn!(error = ?e, "Lazy image loading not set up");
    }
    if let Err(e) = char_counter::mount(session) {
        tracing::warn!(error = ?e, "Character counter not mounted");
    }

    tooltips::init(session);
    polish::search_select_on_focus(session);
    polish::style_tag_select();
    polish::responsive_tables();

    tracing::debug!(listeners = session.listener_count(), "Page enhanced");
}
