//! State Management
//!
//! The per-page session that owns every listener, timer and observer.

pub mod session;

pub use session::{current, install, uninstall, PageSession};
