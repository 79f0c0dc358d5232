// HTTP client for the request server's /generate endpoint.

use std::time::Duration;

use crate::api::GenerateResponse;

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// Connect failure, timeout, or an unreadable body.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct GenerateClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerateClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CallError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("seo-blog-generator-scheduler/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/generate?keyword=..`; no retries.
    pub async fn generate(&self, keyword: &str) -> Result<GenerateResponse, CallError> {
        let resp = self
            .http
            .get(format!("{}/generate", self.base_url))
            .query(&[("keyword", keyword)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CallError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json::<GenerateResponse>().await?)
    }
}
