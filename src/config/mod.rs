//! Process configuration: optional TOML file, then environment overrides.
//!
//! Lookup order for the file:
//! 1) `$BLOGGEN_CONFIG_PATH` (must exist when set)
//! 2) `config/app.toml` (optional)
//!
//! Every key has a default, so running with no file and no env is valid.

pub mod ai;

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;

use crate::config::ai::AiConfig;

pub const ENV_CONFIG_PATH: &str = "BLOGGEN_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_posts_dir() -> PathBuf {
    PathBuf::from("generated_posts")
}
fn default_mock_delay_ms() -> u64 {
    500
}
fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_keywords_file() -> PathBuf {
    PathBuf::from("keywords.json")
}
fn default_log_file() -> PathBuf {
    PathBuf::from("generation_log.json")
}
fn default_run_at() -> String {
    "09:00".to_string()
}
fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
    /// Simulated latency of the mock SEO provider.
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            posts_dir: default_posts_dir(),
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid host address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_keywords_file")]
    pub keywords_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Local wall-clock time of the daily run, `HH:MM`.
    #[serde(default = "default_run_at")]
    pub run_at: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            keywords_file: default_keywords_file(),
            log_file: default_log_file(),
            run_at: default_run_at(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SchedulerConfig {
    pub fn run_at_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.run_at.trim(), "%H:%M")
            .with_context(|| format!("invalid schedule time (expected HH:MM): {}", self.run_at))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load from the default locations and the process environment.
    pub fn load() -> Result<Self> {
        let lookup = |k: &str| std::env::var(k).ok();
        let mut cfg = match lookup(ENV_CONFIG_PATH) {
            Some(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!(
                        "{ENV_CONFIG_PATH} points to non-existent path {}",
                        pb.display()
                    ));
                }
                Self::from_file(&pb)?
            }
            None => {
                let p = Path::new(DEFAULT_CONFIG_PATH);
                if p.exists() {
                    Self::from_file(p)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_overrides(lookup)?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Apply env-style overrides from `lookup`, then normalize the AI section.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v
                .trim()
                .parse()
                .map_err(|e| anyhow!("invalid PORT {v:?}: {e}"))?;
        }
        if let Some(v) = lookup("POSTS_DIR") {
            self.server.posts_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SEO_MOCK_DELAY_MS") {
            self.server.mock_delay_ms = v
                .trim()
                .parse()
                .map_err(|e| anyhow!("invalid SEO_MOCK_DELAY_MS {v:?}: {e}"))?;
        }
        if let Some(v) = lookup("API_URL") {
            self.scheduler.api_url = v;
        }
        if let Some(v) = lookup("KEYWORDS_FILE") {
            self.scheduler.keywords_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("GENERATION_LOG_FILE") {
            self.scheduler.log_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("SCHEDULE_AT") {
            self.scheduler.run_at = v;
        }
        if let Some(v) = lookup("OPENAI_API_KEY") {
            // An explicit key in the file wins over the environment.
            let file_has_key = self
                .ai
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().eq_ignore_ascii_case("env"));
            if !file_has_key {
                self.ai.api_key = Some(v);
            }
        }
        if let Some(v) = lookup("OPENAI_MODEL") {
            self.ai.model = v;
        }
        if let Some(v) = lookup("OPENAI_BASE_URL") {
            self.ai.base_url = v;
        }

        self.ai.normalize(&lookup);
        self.scheduler.run_at_time()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::{env, fs};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.scheduler.api_url, "http://localhost:5000");
        assert_eq!(cfg.scheduler.run_at_time().unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [ai]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.ai.model, "gpt-4o-mini");
        assert_eq!(cfg.ai.max_tokens, 2000);
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(env_of(&[
            ("PORT", "9000"),
            ("API_URL", "http://api.internal:9000"),
            ("OPENAI_API_KEY", "sk-live"),
            ("SCHEDULE_AT", "06:30"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.scheduler.api_url, "http://api.internal:9000");
        assert_eq!(cfg.ai.api_key.as_deref(), Some("sk-live"));
        assert_eq!(
            cfg.scheduler.run_at_time().unwrap(),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_overrides(env_of(&[("PORT", "eighty")])).is_err());
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_overrides(env_of(&[("SCHEDULE_AT", "25:99")])).is_err());
        assert!(AppConfig::from_toml_str("[server\nport=").is_err());
    }

    #[test]
    fn missing_key_is_not_an_error() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(env_of(&[])).unwrap();
        assert!(!cfg.ai.has_api_key());
    }

    #[serial_test::serial]
    #[test]
    fn load_honours_explicit_config_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.toml");
        fs::write(&path, "[scheduler]\nkeywords_file = \"kw.json\"\n").unwrap();

        env::set_var(ENV_CONFIG_PATH, path.display().to_string());
        let cfg = AppConfig::load();
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        let missing = AppConfig::load();
        env::remove_var(ENV_CONFIG_PATH);

        assert_eq!(cfg.unwrap().scheduler.keywords_file, PathBuf::from("kw.json"));
        assert!(missing.is_err());
    }
}
