// Append-only generation log, stored as {"generations": [...]}.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::write_json_atomic;
use crate::seo::SeoMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLogEntry {
    pub timestamp: String,
    pub keyword: String,
    pub filename: String,
    pub seo_metrics: SeoMetrics,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LogFile {
    #[serde(default)]
    generations: Vec<GenerationLogEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to read generation log {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("generation log {path} is not valid JSON; refusing to overwrite: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write generation log {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct GenerationLog {
    path: PathBuf,
}

impl GenerationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> Result<Vec<GenerationLogEntry>, LogError> {
        Ok(self.read()?.generations)
    }

    pub fn append(&self, entry: GenerationLogEntry) -> Result<(), LogError> {
        let mut file = self.read()?;
        file.generations.push(entry);
        write_json_atomic(&self.path, &file).map_err(|source| LogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn read(&self) -> Result<LogFile, LogError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LogFile::default()),
            Err(source) => {
                return Err(LogError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| LogError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}
