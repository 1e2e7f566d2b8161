//! Blog endpoint access
//!
//! # Endpoints
//!
//! - `GET /api/private-chat/summary/` - unread private message count
//! - `POST /api/weather/refresh/` - ask the server to refresh its cached weather (CSRF protected)

pub mod client;
pub mod dto;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

pub use client::{decode_body, BlogApi};
pub use dto::{RefreshResponse, UnreadSummary};
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpBlogApi;
