//! DOM helpers
//!
//! Thin wrappers over `web-sys` lookups. Missing nodes are `None` / empty, never errors:
//! every enhancer treats an absent target as "nothing to do".

use chrono::Offset;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// All elements matching `selector`, in document order
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    query_all_in(&document, selector)
}

pub fn query_all_in(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element matching `selector`, cast to `T`
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// Raw `document.cookie`
pub fn cookie_string() -> String {
    document()
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

/// Viewer's UTC offset, from the JS `Date` of the current instant
pub fn local_offset() -> chrono::FixedOffset {
    // getTimezoneOffset is minutes *behind* UTC
    let minutes = js_sys::Date::new_0().get_timezone_offset();
    chrono::FixedOffset::west_opt((minutes * 60.0) as i32).unwrap_or_else(|| chrono::Utc.fix())
}
