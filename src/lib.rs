// src/lib.rs
// Public library surface shared by both binaries and the integration tests.

pub mod api;
pub mod config;
pub mod content;
pub mod keyword;
pub mod prometheus;
pub mod scheduler;
pub mod seo;
pub mod store;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState, GenerateResponse};
pub use crate::content::{ContentSynthesizer, PostSynthesizer};
pub use crate::seo::{MetricsProvider, MockMetricsProvider, SeoMetrics};
pub use crate::store::PostStore;
