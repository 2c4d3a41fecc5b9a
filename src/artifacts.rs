//! XML feed and JSON dump files.
//!
//! Artifacts are outputs for the operator; nothing reads them back.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

/// Errors raised while writing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Creating the directory or writing the file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The value could not be serialized as JSON.
    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which feed a file holds; used as the file-name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    /// Product feed.
    Product,
    /// Inventory feed.
    Inventory,
    /// Price feed.
    Price,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => f.write_str("product"),
            Self::Inventory => f.write_str("inventory"),
            Self::Price => f.write_str("price"),
        }
    }
}

/// Replaces characters that would escape `dir` or are invalid in file names.
fn sanitize(component: &str) -> String {
    let cleaned: String = component
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

fn write_file(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError> {
    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Writes `xml` to `{dir}/{kind}_feed_{sku}.xml`, creating `dir`.
///
/// # Errors
///
/// Returns [`ArtifactError::Io`] if the directory or file cannot be written.
pub fn save_feed(dir: &Path, kind: FeedKind, sku: &str, xml: &str) -> Result<PathBuf, ArtifactError> {
    let file_name = format!("{kind}_feed_{}.xml", sanitize(sku));
    write_file(dir, &file_name, xml.as_bytes())
}

/// Writes `value` pretty-printed to `{dir}/{prefix}_{YYYYmmdd_HHMMSS}.json`
/// (UTC), creating `dir`.
///
/// # Errors
///
/// Returns [`ArtifactError`] if serialization or writing fails.
pub fn save_json<T: serde::Serialize + ?Sized>(
    dir: &Path,
    prefix: &str,
    value: &T,
) -> Result<PathBuf, ArtifactError> {
    let contents = serde_json::to_string_pretty(value)?;
    let file_name = format!(
        "{}_{}.json",
        sanitize(prefix),
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    write_file(dir, &file_name, contents.as_bytes())
}
