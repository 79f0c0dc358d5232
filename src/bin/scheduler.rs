//! Daily keyword-rotation scheduler.
//!
//! `scheduler --now` runs a single cycle and exits; without flags it waits
//! for the configured time of day (default 09:00 local) and repeats daily.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use seo_blog_generator::config::AppConfig;
use seo_blog_generator::scheduler::{
    client::GenerateClient, log::GenerationLog, rotation::KeywordRotation, Scheduler,
};
use seo_blog_generator::telemetry;
use tracing::info;

#[derive(Parser)]
#[command(name = "scheduler")]
#[command(about = "Generate one SEO blog post per day from a rotating keyword list", long_about = None)]
struct Cli {
    /// Run one generation immediately and exit
    #[arg(long)]
    now: bool,

    /// Base URL of the request server
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => {
            let mut cfg = AppConfig::from_file(path)?;
            cfg.apply_overrides(|k| std::env::var(k).ok())?;
            cfg
        }
        None => AppConfig::load()?,
    };
    if let Some(url) = cli.api_url {
        cfg.scheduler.api_url = url;
    }
    let sc = cfg.scheduler;
    let run_at = sc.run_at_time()?;

    let rotation = KeywordRotation::load_or_init(&sc.keywords_file);
    let client = GenerateClient::new(&sc.api_url, sc.request_timeout())
        .context("building HTTP client")?;
    let log = GenerationLog::new(&sc.log_file);
    let mut scheduler = Scheduler::new(rotation, client, log);

    if cli.now {
        info!(api_url = %sc.api_url, "running immediate generation");
        let outcome = scheduler.run_cycle().await;
        info!(?outcome, "cycle finished");
    } else {
        scheduler.run_daily(run_at).await;
    }
    Ok(())
}
