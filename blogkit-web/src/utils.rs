//! `BlogUtils` helpers for inline page scripts
//!
//! [`install_global`] publishes them as `window.BlogUtils` when the bundle starts:
//!
//! ```js
//! BlogUtils.showNotification("Saved", "success");
//! await BlogUtils.copyToClipboard(link);
//! el.textContent = BlogUtils.formatDate(el.dataset.date);
//! input.addEventListener("input", BlogUtils.debounce(search, 300));
//! ```

use blogkit::{Debouncer, Locale, Notification, Notifier, Severity};
use chrono::Utc;
use js_sys::{Function, Object, Promise, Reflect};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;
use crate::state;
use crate::timers::GlooScheduler;

fn locale() -> Locale {
    state::current().map(|s| s.locale()).unwrap_or_default()
}

fn notify(notification: Notification) {
    match state::current() {
        Some(session) => session.notifier.notify(notification),
        None => tracing::warn!(
            text = %notification.message,
            "No page session, notification dropped"
        ),
    }
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let navigator = Reflect::get(&js_sys::global(), &JsValue::from_str("navigator"))?;
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("navigator.clipboard is unavailable"));
    }
    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

#[wasm_bindgen(js_name = BlogUtils)]
pub struct BlogUtils {}

#[wasm_bindgen(js_class = BlogUtils)]
impl BlogUtils {
    /// `type` is one of `info`, `success`, `danger` (or `error`); anything else shows as info
    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(message: &str, kind: Option<String>) {
        let severity = kind
            .as_deref()
            .and_then(|k| k.parse::<Severity>().ok())
            .unwrap_or_default();
        notify(Notification::new(message, severity));
    }

    #[wasm_bindgen(js_name = copyToClipboard)]
    pub async fn copy_to_clipboard(text: String) {
        let messages = locale().messages();
        match write_clipboard(&text).await {
            Ok(()) => notify(Notification::success(messages.copied)),
            Err(e) => {
                tracing::error!(error = ?e, "Clipboard write failed");
                notify(Notification::danger(messages.copy_failed));
            }
        }
    }

    /// Relative label for recent dates, locale date otherwise
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(date: &str) -> String {
        blogkit::format_date(date, Utc::now(), dom::local_offset(), locale())
    }

    /// Trailing-edge debounce of `func`, forwarding the first argument of the last call
    pub fn debounce(func: Function, wait: u32) -> Function {
        let debouncer = Debouncer::new(
            GlooScheduler,
            Duration::from_millis(u64::from(wait)),
            move |arg: JsValue| {
                if let Err(e) = func.call1(&JsValue::NULL, &arg) {
                    tracing::error!(error = ?e, "Debounced function threw");
                }
            },
        );

        Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| debouncer.call(arg))
            .into_js_value()
            .unchecked_into()
    }
}

/// Expose the helpers as the page-global `BlogUtils` object
pub fn install_global() -> Result<(), JsValue> {
    let utils = Object::new();

    let show_notification = Closure::<dyn Fn(String, Option<String>)>::new(
        |message: String, kind: Option<String>| BlogUtils::show_notification(&message, kind),
    );
    let copy_to_clipboard = Closure::<dyn Fn(String) -> Promise>::new(|text: String| {
        wasm_bindgen_futures::future_to_promise(async move {
            BlogUtils::copy_to_clipboard(text).await;
            Ok(JsValue::UNDEFINED)
        })
    });
    let format_date =
        Closure::<dyn Fn(String) -> String>::new(|date: String| BlogUtils::format_date(&date));
    let debounce = Closure::<dyn Fn(Function, u32) -> Function>::new(BlogUtils::debounce);

    for (name, function) in [
        ("showNotification", show_notification.into_js_value()),
        ("copyToClipboard", copy_to_clipboard.into_js_value()),
        ("formatDate", format_date.into_js_value()),
        ("debounce", debounce.into_js_value()),
    ] {
        Reflect::set(&utils, &JsValue::from_str(name), &function)?;
    }

    Reflect::set(&js_sys::global(), &JsValue::from_str("BlogUtils"), &utils)?;
    Ok(())
}
