//! HTTP plumbing for the catalog search service.

use serde::{Serialize, de::DeserializeOwned};

pub const DEFAULT_SEARCH_SERVICE_URL: &'static str = "http://127.0.0.1:5001";

#[derive(Debug, Clone)]
pub struct SearchServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("SEARCH_SERVICE_URL").unwrap_or(DEFAULT_SEARCH_SERVICE_URL.to_string()))
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_string(body)?;
        let t0 = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let response_txt = response.text().await?;
        let dt_ms = t0.elapsed().as_millis() as u64;
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!("search service error: {} {} ({}ms)", status, url, dt_ms);
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        tracing::debug!("search service response: {} len = {} ({}ms)", url, response_txt.len(), dt_ms);
        let response: T = serde_json::from_str(&response_txt)?;
        Ok(response)
    }
}
