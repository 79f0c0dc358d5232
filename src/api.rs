use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::content::{ContentSynthesizer, PostSynthesizer};
use crate::keyword::{Keyword, KeywordError};
use crate::seo::{MetricsProvider, MockMetricsProvider, SeoMetrics};
use crate::store::{PostStore, StoreError};

/// Services the request handler orchestrates. Constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn MetricsProvider>,
    pub synthesizer: Arc<dyn PostSynthesizer>,
    pub store: PostStore,
}

impl AppState {
    pub fn new(
        metrics: Arc<dyn MetricsProvider>,
        synthesizer: Arc<dyn PostSynthesizer>,
        store: PostStore,
    ) -> Self {
        Self {
            metrics,
            synthesizer,
            store,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            Arc::new(MockMetricsProvider::new(cfg.server.mock_delay())),
            Arc::new(ContentSynthesizer::from_config(&cfg.ai)),
            PostStore::new(cfg.server.posts_dir.clone()),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", get(generate))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Query pairs in request order. A repeated `keyword` resolves to its first
/// value; other parameters are ignored.
type QueryPairs = Vec<(String, String)>;

fn first_keyword(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(name, _)| name == "keyword")
        .map(|(_, value)| value.as_str())
}

/// Body of a successful `/generate`; the scheduler reads the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub keyword: String,
    pub seo_metrics: SeoMetrics,
    pub blog_post: String,
    pub saved_to: String,
    pub generated_at: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn generate(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let started = Instant::now();
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            info!(reason = %rejection.body_text(), "unreadable query string");
            Vec::new()
        }
    };
    let keyword = Keyword::parse(first_keyword(&pairs)).inspect_err(|_| {
        counter!("generate_rejected_total").increment(1);
    })?;
    info!(keyword = %keyword, "generating blog post");

    let seo_metrics = state.metrics.fetch_metrics(keyword.as_str()).await;
    let blog_post = state
        .synthesizer
        .generate_post(keyword.as_str(), &seo_metrics)
        .await;
    let saved = state.store.save(keyword.as_str(), &blog_post).await?;

    counter!("posts_generated_total").increment(1);
    histogram!("generate_duration_ms").record(started.elapsed().as_secs_f64() * 1000.0);

    Ok(Json(GenerateResponse {
        keyword: keyword.into_inner(),
        seo_metrics,
        blog_post,
        saved_to: saved.display().to_string(),
        generated_at: Local::now().to_rfc3339(),
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    BadKeyword(#[from] KeywordError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Serialize)]
struct ClientErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ServerErrorBody {
    error: &'static str,
    message: &'static str,
}

const INTERNAL_ERROR: &str = "Internal server error";

fn server_error(message: &'static str) -> Response {
    counter!("generate_failures_total").increment(1);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ServerErrorBody {
            error: INTERNAL_ERROR,
            message,
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadKeyword(e) => (
                StatusCode::BAD_REQUEST,
                Json(ClientErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response(),
            ApiError::Storage(e) => {
                // Paths and OS errors stay in the log only.
                error!(error = %e, "error generating blog post");
                server_error("failed to save the generated post")
            }
        }
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "request handler panicked");
    server_error("unexpected failure while generating the post")
}
