//! Environment file writer
//!
//! Appends `KEY=value` lines to a dotenv-style file. Existing content is kept
//! byte-for-byte; keys are never deduplicated.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A dotenv-style file at a fixed path.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append entries after the current content and rewrite the file.
    ///
    /// A missing file counts as empty and is created. Returns the appended keys
    /// that were already assigned in the file.
    pub async fn append(&self, entries: &[(&str, String)]) -> Result<Vec<String>, EnvFileError> {
        let mut content = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(EnvFileError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let existing = String::from_utf8_lossy(&content).into_owned();
        let present = existing_keys(&existing);
        let duplicates: Vec<String> = entries
            .iter()
            .filter(|(key, _)| present.contains(key))
            .map(|(key, _)| key.to_string())
            .collect();
        for key in &duplicates {
            warn!(key = %key, path = %self.path.display(), "Key already present, appending a duplicate");
        }

        content.extend_from_slice(format_entries(entries).as_bytes());
        fs::write(&self.path, &content)
            .await
            .map_err(|source| EnvFileError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), count = entries.len(), "Environment file updated");
        Ok(duplicates)
    }
}

/// Render entries as `\nKEY=value` lines, one per entry.
pub fn format_entries(entries: &[(&str, String)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("\n{}={}", key, value))
        .collect()
}

/// Keys assigned anywhere in `content`, ignoring comments and `export ` prefixes.
fn existing_keys(content: &str) -> HashSet<&str> {
    content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            line.split_once('=').map(|(key, _)| key.trim())
        })
        .collect()
}
