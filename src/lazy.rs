//! Deferred image sources

/// An image whose real source sits in a `data-src` attribute until it scrolls into view
pub trait LazyImage {
    /// Remove and return the deferred source, if it is still there
    fn take_deferred_source(&self) -> Option<String>;

    fn set_source(&self, src: &str);
}

/// Promote the deferred source to the real one.
///
/// Returns `true` when the image changed. A second call finds no deferred source and leaves
/// the image alone, so the caller can stop observing after the first `true`.
pub fn reveal(image: &impl LazyImage) -> bool {
    match image.take_deferred_source() {
        Some(src) => {
            image.set_source(&src);
            true
        }
        None => false,
    }
}
