//! Post store: one markdown file per generated post.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create posts directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write post {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct PostStore {
    dir: PathBuf,
}

impl PostStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` under `<keyword>_<YYYYMMDD_HHMMSS>.md` and return the path.
    /// A same-second repeat for the same keyword overwrites the earlier file.
    pub async fn save(&self, keyword: &str, content: &str) -> Result<PathBuf, StoreError> {
        self.save_at(keyword, content, Local::now()).await
    }

    pub async fn save_at(
        &self,
        keyword: &str,
        content: &str,
        at: DateTime<Local>,
    ) -> Result<PathBuf, StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(post_file_name(keyword, &at));
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), "blog post saved");
        Ok(path)
    }
}

/// Spaces become underscores; path separators and reserved characters too,
/// so the name always stays inside the posts directory.
pub fn file_stem(keyword: &str) -> String {
    keyword
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() || c.is_control() => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

pub fn post_file_name(keyword: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}.md", file_stem(keyword), at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_uses_underscores_and_second_precision() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 5, 7).unwrap();
        assert_eq!(
            post_file_name("wireless earbuds", &at),
            "wireless_earbuds_20261019_090507.md"
        );
    }

    #[test]
    fn separators_cannot_escape_the_directory() {
        let stem = file_stem("../../etc/passwd");
        assert!(!stem.contains('/'));
        assert_eq!(stem, ".._.._etc_passwd");
        assert_eq!(file_stem(r"a\b:c"), "a_b_c");
    }
}
