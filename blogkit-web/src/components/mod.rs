//! UI Components
//!
//! The few widgets the bundle renders itself, as Leptos components. Everything else on the
//! page is server-rendered and only enhanced.

pub mod char_counter;
pub mod scroll_top;
pub mod toast;

pub use char_counter::CharCounter;
pub use scroll_top::ScrollTopButton;
pub use toast::{Banner, BannerNotifier};
