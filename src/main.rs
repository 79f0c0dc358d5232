//! SEO blog generator — request server entrypoint.
//! Boots the Axum HTTP server with `/generate`, `/health` and `/metrics`.

use anyhow::Context;
use seo_blog_generator::{api, config::AppConfig, prometheus::Metrics, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; a missing file is fine.
    let _ = dotenvy::dotenv();
    telemetry::init();

    let cfg = AppConfig::load()?;
    let addr = cfg.server.socket_addr()?;

    let metrics = Metrics::init()?;
    let state = api::AppState::from_config(&cfg);
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, posts_dir = %cfg.server.posts_dir.display(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("server error")?;
    Ok(())
}
