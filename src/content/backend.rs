//! External text-generation backend: request shape, trait, and the OpenAI
//! Chat Completions implementation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ai::AiConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Wire body for a chat completion; also what fakes receive in tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend returned no content")]
    Empty,
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Anything that turns a prompt into free-form text. Fully fallible.
#[async_trait::async_trait]
pub trait TextBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
    fn name(&self) -> &'static str;
}

/// OpenAI provider (Chat Completions API).
pub struct OpenAiBackend {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiBackend {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("seo-blog-generator/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        Ok(Self {
            http,
            api_key,
            endpoint,
        })
    }

    pub fn from_config(cfg: &AiConfig) -> Result<Self, BackendError> {
        let key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BackendError::Unavailable("no API key configured".into()))?;
        Self::new(key, &cfg.base_url, Duration::from_secs(cfg.timeout_secs))
    }
}

#[async_trait::async_trait]
impl TextBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            #[serde(default)]
            content: Option<String>,
        }

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: String = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(300)
                .collect();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Resp = resp.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
