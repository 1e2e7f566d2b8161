//! Scroll-to-top button

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::state::PageSession;

pub const BUTTON_CLASS: &str = "btn btn-primary btn-scroll-top";

const BUTTON_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; z-index: 1000; \
     border-radius: 50%; width: 50px; height: 50px; padding: 0;";

fn scroll_offset() -> f64 {
    dom::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn scroll_to_top() {
    let Some(window) = dom::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[component]
pub fn ScrollTopButton(visible: ReadSignal<bool>) -> impl IntoView {
    let style = move || {
        let display = if visible.get() { "block" } else { "none" };
        format!("{} display: {};", BUTTON_STYLE, display)
    };

    view! {
        <button
            type="button"
            class=BUTTON_CLASS
            style=style
            aria-label="Scroll to top"
            on:click=move |_| scroll_to_top()
        >
            <i class="fas fa-chevron-up"></i>
        </button>
    }
}

/// Append the button once per page
pub fn mount(session: &Rc<PageSession>) -> Result<(), JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.query_selector(".btn-scroll-top")?.is_some() {
        return Ok(());
    }
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let host: HtmlElement = document.create_element("div")?.dyn_into()?;
    body.append_child(&host)?;

    let threshold = session.config.ui.scroll_threshold_px;
    let session = Rc::clone(session);
    mount_to(host, move || {
        let (visible, set_visible) = create_signal(scroll_offset() > threshold);
        let handle = window_event_listener(ev::scroll, move |_| {
            set_visible.set(scroll_offset() > threshold);
        });
        session.keep_window_listener(handle);

        view! { <ScrollTopButton visible=visible /> }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogkit::Config;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_mounted_once_and_hidden_at_top() {
        let session = PageSession::new(Config::default());
        mount(&session).unwrap();
        mount(&session).unwrap();

        let buttons = dom::query_all(".btn-scroll-top");
        assert_eq!(buttons.len(), 1);
        let style = buttons[0].get_attribute("style").unwrap_or_default();
        assert!(style.contains("display: none"));
        assert!(style.contains("padding: 0;"));
        assert!(buttons[0].query_selector(".fa-chevron-up").unwrap().is_some());

        session.teardown();
        for button in buttons {
            button.remove();
        }
    }
}
