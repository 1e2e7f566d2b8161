//! Native HTTP client
//!
//! `reqwest` implementation of [`BlogApi`], used by the CLI to exercise a running blog.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::time::Duration;

use super::client::{decode_body, BlogApi};
use super::dto::{RefreshResponse, UnreadSummary};
use crate::config::EndpointConfig;
use crate::error::{ApiError, ApiResult};

/// Blog endpoint client over `reqwest`
pub struct HttpBlogApi {
    client: Client,
    endpoints: EndpointConfig,
}

impl HttpBlogApi {
    /// Create a client; the endpoints need an absolute `base_url`
    pub fn new(endpoints: EndpointConfig, timeout: Duration) -> ApiResult<Self> {
        if !endpoints.base_url.starts_with("http://") && !endpoints.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "base_url must be absolute, got {:?}",
                endpoints.base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    async fn read(response: reqwest::Response) -> ApiResult<(u16, String)> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl BlogApi for HttpBlogApi {
    async fn unread_summary(&self) -> ApiResult<UnreadSummary> {
        let url = self.endpoints.url(&self.endpoints.unread_summary);
        tracing::debug!(%url, "Fetching unread summary");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = Self::read(response).await?;
        decode_body(status, &body)
    }

    async fn refresh_weather(&self, csrf_token: Option<&str>) -> ApiResult<RefreshResponse> {
        let url = self.endpoints.url(&self.endpoints.weather_refresh);
        tracing::debug!(%url, has_token = csrf_token.is_some(), "Requesting weather refresh");

        let mut request = self.client.post(&url).header(CONTENT_TYPE, "application/json");
        if let Some(token) = csrf_token {
            // Outside a browser the cookie half of the CSRF pair has to be sent by hand
            request = request
                .header(self.endpoints.csrf_header.as_str(), token)
                .header(COOKIE, format!("{}={}", self.endpoints.csrf_cookie, token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = Self::read(response).await?;
        decode_body(status, &body)
    }
}
