//! Rotation scheduler: once per trigger, take the next keyword, ask the
//! request server for a post, and record the result in the generation log.
//!
//! Assumes a single scheduler instance per state file. State files are
//! replaced atomically but there is no cross-process locking.

pub mod client;
pub mod log;
pub mod rotation;
pub mod trigger;

use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveTime};
use serde::Serialize;
use tracing::{error, info, warn};

use self::client::{CallError, GenerateClient};
use self::log::{GenerationLog, GenerationLogEntry};
use self::rotation::KeywordRotation;

/// What a single cycle ended with. Failures are already logged.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Generated(GenerationLogEntry),
    /// The server answered with a non-2xx status.
    Rejected { keyword: String, status: u16 },
    /// The server could not be reached or its reply could not be read.
    Unreachable { keyword: String },
    /// The post was generated but the log could not be updated.
    NotLogged { keyword: String, filename: String },
}

pub struct Scheduler {
    rotation: KeywordRotation,
    client: GenerateClient,
    log: GenerationLog,
}

impl Scheduler {
    pub fn new(rotation: KeywordRotation, client: GenerateClient, log: GenerationLog) -> Self {
        Self {
            rotation,
            client,
            log,
        }
    }

    pub fn rotation(&self) -> &KeywordRotation {
        &self.rotation
    }

    pub fn log(&self) -> &GenerationLog {
        &self.log
    }

    /// The cursor is advanced and saved before the request goes out, so a
    /// failed cycle still consumes its keyword.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let keyword = self.rotation.advance();
        info!(keyword = %keyword, "generating daily post");

        let resp = match self.client.generate(&keyword).await {
            Ok(resp) => resp,
            Err(CallError::Status { status, body }) => {
                error!(keyword = %keyword, status, body = %body, "API error");
                warn!(keyword = %keyword, "keyword consumed without a post");
                return CycleOutcome::Rejected { keyword, status };
            }
            Err(CallError::Network(e)) => {
                error!(keyword = %keyword, error = %e, "request failed");
                warn!(keyword = %keyword, "keyword consumed without a post");
                return CycleOutcome::Unreachable { keyword };
            }
        };

        info!(saved_to = %resp.saved_to, "successfully generated post");
        let entry = GenerationLogEntry {
            timestamp: Local::now().to_rfc3339(),
            keyword: keyword.clone(),
            filename: resp.saved_to,
            seo_metrics: resp.seo_metrics,
        };
        match self.log.append(entry.clone()) {
            Ok(()) => CycleOutcome::Generated(entry),
            Err(e) => {
                error!(error = %e, "error logging generation");
                CycleOutcome::NotLogged {
                    keyword,
                    filename: entry.filename,
                }
            }
        }
    }

    /// Run one cycle per day at `at` (local time) until Ctrl-C.
    /// Cycles never overlap: the next sleep starts after the previous cycle.
    pub async fn run_daily(&mut self, at: NaiveTime) {
        info!(at = %at.format("%H:%M"), "scheduler started; generating one post per day");
        info!(keywords = ?self.rotation.keywords(), "keywords in rotation");

        loop {
            let now = Local::now();
            let next = trigger::next_daily_fire(&now, at);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_run = %next.to_rfc3339(), "waiting for next run");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("scheduler stopped by user");
                    return;
                }
            }
            self.run_cycle().await;
        }
    }
}

/// Write JSON to a sibling `.tmp` file, then rename it over `path`.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp_name);
    let mut f = std::fs::File::create(&tmp)?;
    f.write_all(&json)?;
    f.sync_all()?;
    std::fs::rename(tmp, path)?;
    Ok(())
}
