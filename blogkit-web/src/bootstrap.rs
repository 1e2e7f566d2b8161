//! Bootstrap interop
//!
//! Bootstrap's bundle is loaded by the page templates, not by us, so components are looked
//! up on `window.bootstrap` at call time. A page without Bootstrap gets an `Err`, which the
//! callers log and fall back from.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// `new bootstrap[component](element)`
pub fn construct(component: &str, element: &Element) -> Result<JsValue, JsValue> {
    let global = js_sys::global();
    let namespace = Reflect::get(&global, &JsValue::from_str("bootstrap"))?;
    if namespace.is_undefined() {
        return Err(JsValue::from_str("window.bootstrap is not loaded"));
    }

    let constructor: Function = Reflect::get(&namespace, &JsValue::from_str(component))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("bootstrap.{} is not a constructor", component)))?;

    Reflect::construct(&constructor, &Array::of1(element))
}

/// `instance[method]()`
pub fn call(instance: &JsValue, method: &str) -> Result<(), JsValue> {
    let function: Function = Reflect::get(instance, &JsValue::from_str(method))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not a method", method)))?;
    function.call0(instance)?;
    Ok(())
}
