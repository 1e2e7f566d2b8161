//! Form submit guard

use wasm_bindgen::JsCast;
use web_sys::HtmlButtonElement;

use crate::dom;
use crate::state::PageSession;

pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// Disable the submit button and show a spinner once the form is sent. There is no
/// re-enable: the submission navigates away.
pub fn guard_submissions(session: &PageSession) {
    let label = session.messages().processing;

    for form in dom::query_all("form") {
        let owner = form.clone();
        session.listen(&form, "submit", move |_| {
            let button = owner
                .query_selector(SUBMIT_SELECTOR)
                .ok()
                .flatten()
                .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());

            if let Some(button) = button {
                button.set_disabled(true);
                button.set_inner_html(&format!(
                    "<i class=\"fas fa-spinner fa-spin\"></i> {}",
                    label
                ));
            }
        });
    }
}
