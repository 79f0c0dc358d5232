//! # SEO metrics
//!
//! Typed SEO signals for a keyword and the provider abstraction that produces
//! them. The only provider today is [`MockMetricsProvider`], which returns
//! randomized but internally consistent values after a simulated round-trip.
//! A real data source plugs in behind [`MetricsProvider`] without touching
//! the request handler.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Related keywords are capped at this many entries.
pub const MAX_RELATED_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Rising, Trend::Stable, Trend::Declining];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl Competition {
    /// `<30` low, `<70` medium, otherwise high.
    pub fn from_difficulty(difficulty: u8) -> Self {
        if difficulty < 30 {
            Competition::Low
        } else if difficulty < 70 {
            Competition::Medium
        } else {
            Competition::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::Low => "low",
            Competition::Medium => "medium",
            Competition::High => "high",
        }
    }
}

impl std::fmt::Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetrics {
    pub search_volume: u32,
    /// 1..=100
    pub keyword_difficulty: u8,
    pub avg_cpc: f64,
    pub related_keywords: Vec<String>,
    pub trend: Trend,
    pub competition: Competition,
}

impl SeoMetrics {
    /// Build a bundle whose `competition` is derived from `keyword_difficulty`
    /// and whose related keywords are truncated to [`MAX_RELATED_KEYWORDS`].
    pub fn new(
        search_volume: u32,
        keyword_difficulty: u8,
        avg_cpc: f64,
        mut related_keywords: Vec<String>,
        trend: Trend,
    ) -> Self {
        let keyword_difficulty = keyword_difficulty.clamp(1, 100);
        related_keywords.truncate(MAX_RELATED_KEYWORDS);
        Self {
            search_volume,
            keyword_difficulty,
            avg_cpc,
            related_keywords,
            trend,
            competition: Competition::from_difficulty(keyword_difficulty),
        }
    }
}

/// `"<kw> tutorial"`, `"best <kw>"`, `"<kw> guide"`.
pub fn related_keywords_for(keyword: &str) -> Vec<String> {
    let mut out = vec![
        format!("{keyword} tutorial"),
        format!("best {keyword}"),
        format!("{keyword} guide"),
    ];
    out.truncate(MAX_RELATED_KEYWORDS);
    out
}

#[async_trait::async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Infallible by contract: providers recover internally.
    async fn fetch_metrics(&self, keyword: &str) -> SeoMetrics;
    fn name(&self) -> &'static str;
}

/// Randomized metrics with an artificial network delay.
#[derive(Debug, Clone)]
pub struct MockMetricsProvider {
    delay: Duration,
}

impl MockMetricsProvider {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay; used by tests and local tooling.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    fn sample(keyword: &str) -> SeoMetrics {
        let mut rng = rand::rng();
        let search_volume = rng.random_range(100..=50_000u32);
        let difficulty = rng.random_range(1..=100u8);
        let cpc_cents = rng.random_range(10..=500u32);
        let trend = *Trend::ALL.choose(&mut rng).unwrap_or(&Trend::Stable);

        SeoMetrics::new(
            search_volume,
            difficulty,
            f64::from(cpc_cents) / 100.0,
            related_keywords_for(keyword),
            trend,
        )
    }
}

impl Default for MockMetricsProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait::async_trait]
impl MetricsProvider for MockMetricsProvider {
    async fn fetch_metrics(&self, keyword: &str) -> SeoMetrics {
        tracing::info!(keyword, provider = self.name(), "fetching SEO metrics");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Self::sample(keyword)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
