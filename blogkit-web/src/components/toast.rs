//! Notification Banner Component
//!
//! Fixed top-right Bootstrap alert. Each banner gets its own host element under `<body>`
//! and removes itself after the configured lifetime; the close button dismisses it early.

use blogkit::notification::BANNER_STYLE;
use blogkit::{Notification, Notifier, Timers};
use leptos::*;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::dom;
use crate::timers::GlooScheduler;

/// A single banner
#[component]
pub fn Banner(notification: Notification) -> impl IntoView {
    view! {
        <div class=notification.css_class() style=BANNER_STYLE role="alert">
            // Text node, never parsed as markup
            {notification.message}
            <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
        </div>
    }
}

/// Mount `notification` and schedule its removal
pub fn show(
    notification: Notification,
    timers: &Timers<GlooScheduler>,
    lifetime: Duration,
) -> Result<(), JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let host: HtmlElement = document.create_element("div")?.dyn_into()?;
    host.set_class_name("blogkit-notification");
    body.append_child(&host)?;

    mount_to(host.clone(), move || view! { <Banner notification=notification /> });

    timers.after(lifetime, move || host.remove());
    Ok(())
}

/// [`Notifier`] that renders banners into the page
pub struct BannerNotifier {
    timers: Rc<Timers<GlooScheduler>>,
    lifetime: Duration,
}

impl BannerNotifier {
    pub fn new(timers: Rc<Timers<GlooScheduler>>, lifetime: Duration) -> Self {
        Self { timers, lifetime }
    }
}

impl Notifier for BannerNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, "Showing notification");
        if let Err(e) = show(notification, &self.timers, self.lifetime) {
            tracing::error!(error = ?e, "Failed to show notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogkit::Severity;
    use wasm_bindgen_test::*;

    fn clear_banners() {
        for host in dom::query_all(".blogkit-notification") {
            host.remove();
        }
    }

    #[wasm_bindgen_test]
    fn test_banner_markup() {
        let timers = Timers::new(GlooScheduler);
        show(Notification::success("Saved"), &timers, Duration::from_secs(60)).unwrap();

        let banner = dom::query::<web_sys::Element>(".blogkit-notification .alert").unwrap();
        let class = banner.class_name();
        assert!(class.contains("alert-success"));
        assert!(class.contains("alert-dismissible"));
        assert!(banner.text_content().unwrap().contains("Saved"));
        assert!(banner.query_selector(".btn-close").unwrap().is_some());

        timers.teardown();
        clear_banners();
    }

    #[wasm_bindgen_test]
    fn test_message_is_text_not_markup() {
        let timers = Timers::new(GlooScheduler);
        let notification = Notification::new("<b>bold</b>", Severity::Danger);
        show(notification, &timers, Duration::from_secs(60)).unwrap();

        let banner = dom::query::<web_sys::Element>(".blogkit-notification .alert-danger").unwrap();
        assert!(banner.query_selector("b").unwrap().is_none());
        assert!(banner.text_content().unwrap().contains("<b>bold</b>"));

        timers.teardown();
        clear_banners();
    }

    #[wasm_bindgen_test]
    async fn test_banner_removed_after_lifetime() {
        let timers = Timers::new(GlooScheduler);
        show(Notification::info("Bye"), &timers, Duration::from_millis(20)).unwrap();
        assert_eq!(dom::query_all(".blogkit-notification").len(), 1);

        gloo_timers::future::TimeoutFuture::new(100).await;
        assert!(dom::query_all(".blogkit-notification").is_empty());
    }
}
