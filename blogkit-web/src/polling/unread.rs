//! Private chat unread badge

use blogkit::{BadgeState, UnreadBadge, UnreadPoller};
use std::rc::Rc;
use web_sys::HtmlElement;

use crate::dom;
use crate::state::PageSession;

pub const BADGE_SELECTOR: &str = ".private-chat-unread";

pub struct BadgeElement(pub HtmlElement);

impl UnreadBadge for BadgeElement {
    fn render(&self, state: BadgeState) {
        let style = self.0.style();
        let shown = match state {
            BadgeState::Visible(count) => {
                self.0.set_text_content(Some(&count.to_string()));
                style.set_property("display", "inline")
            }
            BadgeState::Hidden => style.set_property("display", "none"),
        };
        if let Err(e) = shown {
            tracing::debug!(error = ?e, "Failed to style unread badge");
        }
    }
}

/// Start polling if the page shows the badge
pub fn start(session: &PageSession) {
    let Some(badge) = dom::query::<HtmlElement>(BADGE_SELECTOR) else {
        return;
    };

    let poller = Rc::new(UnreadPoller::new(Rc::clone(&session.api), BadgeElement(badge)));
    let period = session.config.timing.unread_poll();
    tracing::info!(period_ms = period.as_millis() as u64, "Starting unread summary polling");
    poller.start(&session.timers, period);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::Fixture;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_badge_render() {
        let fixture = Fixture::new(r#"<span class="private-chat-unread" style="display: none"></span>"#);
        let badge = BadgeElement(fixture.find(BADGE_SELECTOR));

        badge.render(BadgeState::Visible(7));
        assert_eq!(badge.0.text_content().as_deref(), Some("7"));
        assert_eq!(badge.0.style().get_property_value("display").unwrap(), "inline");

        badge.render(BadgeState::Hidden);
        assert_eq!(badge.0.style().get_property_value("display").unwrap(), "none");
        assert_eq!(badge.0.text_content().as_deref(), Some("7"));
    }
}
