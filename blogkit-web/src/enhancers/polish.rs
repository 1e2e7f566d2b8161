//! Small template fixups

use web_sys::{Element, HtmlInputElement};

use crate::dom;
use crate::state::PageSession;

/// Select the whole query when the search box gains focus
pub fn search_select_on_focus(session: &PageSession) {
    let Some(input) = dom::query::<HtmlInputElement>("input[name=\"q\"]") else {
        return;
    };
    let target = input.clone();
    session.listen(&input, "focus", move |_| target.select());
}

pub fn style_tag_select() {
    if let Some(select) = dom::query::<Element>("#id_tags") {
        if let Err(e) = select.class_list().add_1("form-select") {
            tracing::debug!(error = ?e, "Failed to style tag select");
        }
    }
}

pub fn responsive_tables() {
    for table in dom::query_all("table") {
        if let Err(e) = table.class_list().add_1("table-responsive") {
            tracing::debug!(error = ?e, "Failed to mark table responsive");
        }
    }
}
