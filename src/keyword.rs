//! Keyword validation for the `/generate` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_KEYWORD_CHARS: usize = 2;
pub const MAX_KEYWORD_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeywordError {
    #[error("Missing required parameter: keyword")]
    Missing,
    #[error("Keyword must be between 2 and 100 characters")]
    Length { chars: usize },
}

/// A trimmed topic string of 2..=100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Validate a raw query value. Absent and empty values are "missing";
    /// everything else is trimmed and length-checked in chars, not bytes.
    pub fn parse(raw: Option<&str>) -> Result<Self, KeywordError> {
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => return Err(KeywordError::Missing),
        };
        let trimmed = raw.trim();
        let chars = trimmed.chars().count();
        if !(MIN_KEYWORD_CHARS..=MAX_KEYWORD_CHARS).contains(&chars) {
            return Err(KeywordError::Length { chars });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
