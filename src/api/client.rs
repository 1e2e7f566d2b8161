//! Endpoint client seam
//!
//! [`BlogApi`] is implemented with `gloo-net` in the browser bundle and with `reqwest` for the
//! native CLI (see [`super::http`]). The polling clients only see the trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::dto::{RefreshResponse, UnreadSummary};
use crate::error::{ApiError, ApiResult};

/// The two JSON endpoints the front end talks to
#[async_trait(?Send)]
pub trait BlogApi {
    /// `GET` the private-chat summary
    async fn unread_summary(&self) -> ApiResult<UnreadSummary>;

    /// `POST` a weather refresh, echoing the CSRF token when one is available
    async fn refresh_weather(&self, csrf_token: Option<&str>) -> ApiResult<RefreshResponse>;
}

/// Decode a response body.
///
/// The body is parsed whatever the status: the weather endpoint reports failures as
/// `{"success": false}` with an error status. Only when a non-2xx body is not the expected
/// JSON does the status itself become the error.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !(200..=299).contains(&status) => Err(ApiError::Status {
            status,
            body: truncate(body, 200),
        }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
