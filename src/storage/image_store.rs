// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Flat-file sink for relayed images
//!
//! Images are written once under a random file name and never updated or
//! deleted. File names are the only index; there is no retention policy.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No file with this name exists in the store
    #[error("image '{0}' not found")]
    NotFound(String),

    /// Disk fault surfaced to the caller (disk full, permission denied)
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Capability for generating collision-resistant file names, kept behind a
/// trait so deterministic names can be injected in tests.
pub trait FileNameGenerator: Send + Sync {
    fn file_name(&self, extension: &str) -> String;
}

/// Default generator: `{uuid4-hex}.{ext}`. Collision probability is
/// negligible and not formally prevented.
pub struct UuidFileNames;

impl FileNameGenerator for UuidFileNames {
    fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", Uuid::new_v4().simple(), extension)
    }
}

/// Store for persisted images inside a fixed base directory.
pub struct ImageStore {
    base_dir: PathBuf,
    names: Arc<dyn FileNameGenerator>,
}

impl ImageStore {
    /// Create a store rooted at `base_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(base_dir: impl Into<PathBuf>, names: Arc<dyn FileNameGenerator>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create image directory {}", base_dir.display()))?;
        Ok(Self { base_dir, names })
    }

    /// Write `bytes` to a freshly named `{id}.{extension}` file and return
    /// the file name. The whole buffer goes down in a single write call, so
    /// readers never observe a truncated file at the expected sizes.
    pub async fn save(&self, bytes: &[u8], extension: &str) -> Result<String, StoreError> {
        let file_name = self.names.file_name(extension);
        let path = self.base_dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;
        debug!("saved {} bytes to {}", bytes.len(), path.display());
        Ok(file_name)
    }

    /// Read a previously saved image back by name.
    ///
    /// Only a single normal path component is accepted; names carrying
    /// `..`, separators, or absolute paths never resolve outside the base
    /// directory and report as not found.
    pub async fn read(&self, filename: &str) -> Result<Bytes, StoreError> {
        if !is_plain_file_name(filename) {
            warn!("rejected unsafe image name '{}'", filename);
            return Err(StoreError::NotFound(filename.to_string()));
        }
        let path = self.base_dir.join(filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Bytes::from(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Content type for a saved image, from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
