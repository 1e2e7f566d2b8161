//! HTTP API Client
//!
//! `gloo-net` implementation of the blog endpoint client. Requests go to the page's own
//! origin unless the page config sets a base URL; the browser attaches the session cookies.

use async_trait::async_trait;
use blogkit::api::{decode_body, BlogApi, RefreshResponse, UnreadSummary};
use blogkit::{ApiError, ApiResult, EndpointConfig};
use gloo_net::http::{Request, Response};

pub struct GlooBlogApi {
    endpoints: EndpointConfig,
}

impl GlooBlogApi {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    async fn read(response: Response) -> ApiResult<(u16, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;
        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl BlogApi for GlooBlogApi {
    async fn unread_summary(&self) -> ApiResult<UnreadSummary> {
        let url = self.endpoints.url(&self.endpoints.unread_summary);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = Self::read(response).await?;
        decode_body(status, &body)
    }

    async fn refresh_weather(&self, csrf_token: Option<&str>) -> ApiResult<RefreshResponse> {
        let url = self.endpoints.url(&self.endpoints.weather_refresh);

        let mut request = Request::post(&url).header("Content-Type", "application/json");
        if let Some(token) = csrf_token {
            request = request.header(&self.endpoints.csrf_header, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = Self::read(response).await?;
        decode_body(status, &body)
    }
}
