//! Keyword rotation: a persisted circular cursor over a keyword list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::write_json_atomic;

pub const DEFAULT_KEYWORDS: [&str; 5] = [
    "wireless earbuds",
    "python tutorial",
    "machine learning basics",
    "web development tips",
    "digital marketing strategies",
];

#[derive(Debug, thiserror::Error)]
pub enum RotationError {
    #[error("keyword list is empty")]
    Empty,
    #[error("failed to persist rotation state to {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// On-disk shape of the keywords file. Only built through [`RotationState::new`]
/// or [`RotationState::builtin`], so the cursor always points into a non-empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationState {
    keywords: Vec<String>,
    current_index: usize,
}

impl RotationState {
    pub fn new(keywords: Vec<String>, current_index: usize) -> Result<Self, RotationError> {
        if keywords.is_empty() {
            return Err(RotationError::Empty);
        }
        let current_index = current_index % keywords.len();
        Ok(Self {
            keywords,
            current_index,
        })
    }

    pub fn builtin() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            current_index: 0,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Return the keyword under the cursor and move the cursor forward, wrapping.
    pub fn advance(&mut self) -> String {
        let keyword = self.keywords[self.current_index].clone();
        self.current_index = (self.current_index + 1) % self.keywords.len();
        keyword
    }
}

/// Rotation state bound to its file. Every advance is saved immediately.
#[derive(Debug)]
pub struct KeywordRotation {
    path: PathBuf,
    state: RotationState,
}

impl KeywordRotation {
    /// Load the state file. A missing or unusable file is replaced by the
    /// built-in list, which is written back straight away.
    pub fn load_or_init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match read_state(&path) {
            Ok(Some(state)) => return Self { path, state },
            Ok(None) => RotationState::builtin(),
            Err(reason) => {
                warn!(path = %path.display(), reason = %reason, "keywords file unusable; restoring defaults");
                RotationState::builtin()
            }
        };
        let rotation = Self { path, state };
        if let Err(e) = rotation.save() {
            error!(error = %e, "could not write default keywords file");
        }
        rotation
    }

    /// Bind an explicit keyword list to `path` and persist it. An empty list is
    /// rejected; an out-of-range cursor wraps modulo the list length.
    pub fn create(
        path: impl Into<PathBuf>,
        keywords: Vec<String>,
        current_index: usize,
    ) -> Result<Self, RotationError> {
        let rotation = Self {
            path: path.into(),
            state: RotationState::new(keywords, current_index)?,
        };
        rotation.save()?;
        Ok(rotation)
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn keywords(&self) -> &[String] {
        self.state.keywords()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pre-increment keyword; the new cursor is on disk before this returns.
    /// A failed save is logged and the in-memory cursor still moves.
    pub fn advance(&mut self) -> String {
        let keyword = self.state.advance();
        if let Err(e) = self.save() {
            error!(error = %e, "error saving keyword rotation");
        }
        keyword
    }

    pub fn save(&self) -> Result<(), RotationError> {
        write_json_atomic(&self.path, &self.state).map_err(|source| RotationError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}

/// `Ok(None)` when the file does not exist, `Err(reason)` when it is unusable.
fn read_state(path: &Path) -> Result<Option<RotationState>, String> {
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        keywords: Vec<String>,
        #[serde(default)]
        current_index: usize,
    }

    let data = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let raw: Raw = serde_json::from_str(&data).map_err(|e| e.to_string())?;
    let keywords: Vec<String> = raw
        .keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    RotationState::new(keywords, raw.current_index)
        .map(Some)
        .map_err(|e| e.to_string())
}
