//! Lazy image loading
//!
//! `<img data-src="...">` gets its real source on first intersection with the viewport.
//! Browsers without `IntersectionObserver` load everything up front.

use blogkit::lazy::{self, LazyImage};
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;
use crate::state::PageSession;

pub const DEFERRED_ATTR: &str = "data-src";

/// An element whose source sits in `data-src`
pub struct DeferredImage(pub Element);

impl LazyImage for DeferredImage {
    fn take_deferred_source(&self) -> Option<String> {
        let src = self.0.get_attribute(DEFERRED_ATTR)?;
        if let Err(e) = self.0.remove_attribute(DEFERRED_ATTR) {
            tracing::debug!(error = ?e, "Failed to clear data-src");
        }
        Some(src)
    }

    fn set_source(&self, src: &str) {
        match self.0.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.set_src(src),
            None => {
                if let Err(e) = self.0.set_attribute("src", src) {
                    tracing::debug!(error = ?e, "Failed to set src");
                }
            }
        }
    }
}

pub fn observe(session: &PageSession) -> Result<(), JsValue> {
    let images = dom::query_all("img[data-src]");
    if images.is_empty() {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                lazy::reveal(&DeferredImage(target.clone()));
                observer.unobserve(&target);
            }
        },
    );

    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(e) => {
            tracing::warn!(error = ?e, "IntersectionObserver unavailable, loading images eagerly");
            for image in images {
                lazy::reveal(&DeferredImage(image));
            }
            return Ok(());
        }
    };

    for image in &images {
        observer.observe(image);
    }
    tracing::debug!(count = images.len(), "Observing deferred images");

    session.keep_observer(observer, callback);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::Fixture;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_reveal_promotes_data_src_once() {
        let fixture = Fixture::new(r#"<img id="deferred" data-src="/media/cover.png">"#);
        let img: HtmlImageElement = fixture.find("#deferred");
        let image = DeferredImage(img.clone().into());

        assert!(lazy::reveal(&image));
        assert!(img.src().ends_with("/media/cover.png"));
        assert!(!img.has_attribute(DEFERRED_ATTR));

        assert!(!lazy::reveal(&image));
    }

    #[wasm_bindgen_test]
    fn test_reveal_on_non_image_sets_src_attribute() {
        let fixture = Fixture::new(r#"<div id="poster" data-src="/media/poster.png"></div>"#);
        let div: Element = fixture.find("#poster");

        assert!(lazy::reveal(&DeferredImage(div.clone())));
        assert_eq!(div.get_attribute("src").as_deref(), Some("/media/poster.png"));
        assert!(!div.has_attribute(DEFERRED_ATTR));
    }

    #[wasm_bindgen_test]
    async fn test_visible_image_revealed_once() {
        let fixture = Fixture::new(
            r#"<img id="in-view" data-src="/media/first.png"
                    style="position: fixed; top: 0; left: 0; width: 10px; height: 10px">"#,
        );
        let img: HtmlImageElement = fixture.find("#in-view");
        let session = crate::state::PageSession::new(blogkit::Config::default());

        observe(&session).unwrap();
        gloo_timers::future::TimeoutFuture::new(200).await;

        assert!(img.src().ends_with("/media/first.png"));
        assert!(!img.has_attribute(DEFERRED_ATTR));

        // Unobserved after the first reveal
        img.set_attribute(DEFERRED_ATTR, "/media/second.png").unwrap();
        img.style().set_property("top", "10px").unwrap();
        gloo_timers::future::TimeoutFuture::new(200).await;
        assert!(img.src().ends_with("/media/first.png"));
        assert!(img.has_attribute(DEFERRED_ATTR));

        session.teardown();
    }

    #[wasm_bindgen_test]
    fn test_observe_without_images_keeps_nothing() {
        let session = crate::state::PageSession::new(blogkit::Config::default());
        observe(&session).unwrap();
        session.teardown();
    }
}
