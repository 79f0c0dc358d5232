//! Content synthesis: external generation with an always-available
//! template fallback. Callers never see a failure from this module.

pub mod backend;
pub mod front_matter;
pub mod prompt;
pub mod template;

use std::sync::Arc;

use chrono::Local;
use metrics::counter;
use tracing::{info, warn};

use crate::config::ai::AiConfig;
use crate::content::backend::{OpenAiBackend, TextBackend};
use crate::seo::SeoMetrics;

/// Literal placeholders later swapped for real affiliate URLs.
pub const AFFILIATE_MARKERS: [&str; 3] = ["{{AFF_LINK_1}}", "{{AFF_LINK_2}}", "{{AFF_LINK_3}}"];

/// Seam used by the request handler so tests can count or replace synthesis.
#[async_trait::async_trait]
pub trait PostSynthesizer: Send + Sync {
    /// Complete article: front matter, blank line, body.
    async fn generate_post(&self, keyword: &str, metrics: &SeoMetrics) -> String;
}

pub struct ContentSynthesizer {
    backend: Option<Arc<dyn TextBackend>>,
    cfg: AiConfig,
}

impl ContentSynthesizer {
    pub fn new(backend: Option<Arc<dyn TextBackend>>, cfg: AiConfig) -> Self {
        Self { backend, cfg }
    }

    /// Template-only synthesizer.
    pub fn fallback_only() -> Self {
        Self::new(None, AiConfig::default())
    }

    /// Builds the OpenAI backend when a key is configured; otherwise warns
    /// once and stays in fallback mode.
    pub fn from_config(cfg: &AiConfig) -> Self {
        match OpenAiBackend::from_config(cfg) {
            Ok(b) => {
                info!(model = %cfg.model, "text generation backend enabled");
                Self::new(Some(Arc::new(b)), cfg.clone())
            }
            Err(e) => {
                warn!(error = %e, "text generation backend unavailable; using template fallback");
                Self::new(None, cfg.clone())
            }
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn render_fallback(&self, keyword: &str, metrics: &SeoMetrics) -> String {
        let now = Local::now();
        format!(
            "{}\n\n{}",
            front_matter::render(keyword, metrics, &now),
            template::render_body(keyword, metrics, &now)
        )
    }
}

#[async_trait::async_trait]
impl PostSynthesizer for ContentSynthesizer {
    async fn generate_post(&self, keyword: &str, metrics: &SeoMetrics) -> String {
        info!(keyword, "generating blog post");

        let Some(backend) = &self.backend else {
            counter!("content_fallback_total").increment(1);
            return self.render_fallback(keyword, metrics);
        };

        let request = prompt::build_request(&self.cfg, keyword, metrics);
        match backend.complete(&request).await {
            Ok(text) => {
                let header = front_matter::render(keyword, metrics, &Local::now());
                format!("{header}\n\n{text}")
            }
            Err(e) => {
                warn!(keyword, backend = backend.name(), error = %e, "generation failed; using template fallback");
                counter!("content_fallback_total").increment(1);
                self.render_fallback(keyword, metrics)
            }
        }
    }
}
