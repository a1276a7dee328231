//! # Pack Data Sources
//!
//! Where the service gets pack documents from:
//!
//! - [`PackSource::Remote`]: the Packstack pack API via `packstack-client`.
//! - [`PackSource::Directory`]: `{dir}/{id}.json` files on local disk.
//!
//! Both return `Ok(None)` for a pack that does not exist. Any other failure
//! is a [`SourceError`]; the route layer logs it and answers 404.

use std::path::{Path, PathBuf};

use packstack_client::{PackApiError, PackClient};
use packstack_core::{PackData, PackId};

/// Errors from loading a pack document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The remote pack API failed.
    #[error(transparent)]
    Remote(#[from] PackApiError),

    /// A pack file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pack file is not a valid pack document.
    #[error("failed to parse JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A source of pack documents.
#[derive(Debug, Clone)]
pub enum PackSource {
    Remote(PackClient),
    Directory(PathBuf),
}

impl PackSource {
    /// Load the pack with the given id.
    pub async fn fetch(&self, id: &PackId) -> Result<Option<PackData>, SourceError> {
        match self {
            Self::Remote(client) => Ok(client.fetch_pack(id).await?),
            Self::Directory(dir) => fetch_from_dir(dir, id).await,
        }
    }
}

/// Ids that are safe to use as a file stem: non-empty, no path separators,
/// no leading dot.
fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(&['/', '\\', '\0'][..])
}

async fn fetch_from_dir(dir: &Path, id: &PackId) -> Result<Option<PackData>, SourceError> {
    if !is_safe_file_stem(id.as_str()) {
        tracing::debug!(pack_id = %id, "rejected pack id as file name");
        return Ok(None);
    }

    let path = dir.join(format!("{id}.json"));
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SourceError::Io { path, source }),
    };

    PackData::from_json(&text)
        .map(Some)
        .map_err(|source| SourceError::Parse { path, source })
}
