//! Post editor character counter

use blogkit::{CharCount, Messages};
use leptos::*;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, HtmlTextAreaElement};

use crate::dom;
use crate::state::PageSession;

pub const EDITOR_SELECTOR: &str = "#id_content";

#[component]
pub fn CharCounter(count: ReadSignal<CharCount>, label: &'static str) -> impl IntoView {
    view! {
        <div
            class="form-text text-end char-counter"
            style=move || format!("color: {};", count.get().level.color())
        >
            {label}
            <span class="char-count">{move || count.get().count}</span>
        </div>
    }
}

/// Attach a counter below the editor, if the page has one
pub fn mount(session: &Rc<PageSession>) -> Result<(), JsValue> {
    let Some(editor) = dom::query::<HtmlTextAreaElement>(EDITOR_SELECTOR) else {
        return Ok(());
    };
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let parent = editor
        .parent_element()
        .ok_or_else(|| JsValue::from_str("editor has no parent"))?;

    let host: HtmlElement = document.create_element("div")?.dyn_into()?;
    parent.append_child(&host)?;

    let messages: &'static Messages = session.messages();
    let session = Rc::clone(session);
    mount_to(host, move || {
        let (count, set_count) = create_signal(CharCount::of(&editor.value()));

        let source = editor.clone();
        session.listen(&editor, "input", move |_| {
            set_count.set(CharCount::of(&source.value()));
        });

        view! { <CharCounter count=count label=messages.char_count /> }
    });

    Ok(())
}
