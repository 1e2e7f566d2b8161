//! Bootstrap tooltips

use crate::bootstrap;
use crate::dom;
use crate::state::PageSession;

pub fn init(session: &PageSession) {
    for element in dom::query_all("[data-bs-toggle=\"tooltip\"]") {
        match bootstrap::construct("Tooltip", &element) {
            Ok(instance) => session.keep_tooltip(instance),
            Err(e) => {
                // Same failure for every remaining element
                tracing::warn!(error = ?e, "Bootstrap Tooltip unavailable");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::Fixture;
    use blogkit::Config;
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    fn global_count(name: &str) -> f64 {
        Reflect::get(&js_sys::global(), &JsValue::from_str(name))
            .unwrap()
            .as_f64()
            .unwrap_or(0.0)
    }

    /// Minimal `window.bootstrap.Tooltip` that counts constructions and disposals
    fn install_stub() {
        let tooltip = Function::new_with_args(
            "el",
            "globalThis.tooltipsCreated = (globalThis.tooltipsCreated || 0) + 1; \
             this.dispose = function () { \
                 globalThis.tooltipsDisposed = (globalThis.tooltipsDisposed || 0) + 1; \
             };",
        );
        let namespace = Object::new();
        Reflect::set(&namespace, &JsValue::from_str("Tooltip"), &tooltip).unwrap();

        let global = js_sys::global();
        Reflect::set(&global, &JsValue::from_str("bootstrap"), &namespace).unwrap();
        for counter in ["tooltipsCreated", "tooltipsDisposed"] {
            Reflect::set(&global, &JsValue::from_str(counter), &JsValue::from(0)).unwrap();
        }
    }

    fn remove_stub() {
        Reflect::delete_property(&js_sys::global(), &JsValue::from_str("bootstrap")).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_one_instance_per_element_disposed_on_teardown() {
        let _fixture = Fixture::new(
            r#"<a data-bs-toggle="tooltip" title="one">1</a>
               <a data-bs-toggle="tooltip" title="two">2</a>
               <a title="plain">3</a>"#,
        );
        install_stub();

        let session = PageSession::new(Config::default());
        init(&session);
        assert_eq!(global_count("tooltipsCreated"), 2.0);
        assert_eq!(global_count("tooltipsDisposed"), 0.0);

        session.teardown();
        assert_eq!(global_count("tooltipsDisposed"), 2.0);

        remove_stub();
    }

    #[wasm_bindgen_test]
    fn test_without_bootstrap_is_harmless() {
        let _fixture = Fixture::new(r#"<a data-bs-toggle="tooltip" title="one">1</a>"#);
        let session = PageSession::new(Config::default());
        init(&session);
        session.teardown();
    }
}
