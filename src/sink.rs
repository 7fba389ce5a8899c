//! Destinations for finished export files.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::core::ExportResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub filename: String,
    /// Where the file ended up: a path, or `memory://<name>`.
    pub location: String,
    pub size_bytes: usize,
}

#[async_trait]
pub trait FileSink: Send + Sync {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> ExportResult<SavedArtifact>;
}

/// Writes files under a directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct LocalDirSink {
    root: PathBuf,
}

impl LocalDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalDirSink { root: root.into() }
    }
}

#[async_trait]
impl FileSink for LocalDirSink {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> ExportResult<SavedArtifact> {
        tokio::fs::create_dir_all(&self.root).await?;

        let target = self.root.join(filename);
        let partial = self.root.join(format!(".{}.part", filename));

        // Readers never see a half-written file
        if let Err(e) = write_then_rename(&partial, &target, &bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        tracing::info!(file = %target.display(), size = bytes.len(), "Export saved");

        Ok(SavedArtifact {
            filename: filename.to_string(),
            location: target.display().to_string(),
            size_bytes: bytes.len(),
        })
    }
}

async fn write_then_rename(partial: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, bytes).await?;
    tokio::fs::rename(partial, target).await
}

/// Keeps exports in memory, for hosts that deliver the bytes themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(filename).cloned()
    }

    pub async fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl FileSink for MemorySink {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> ExportResult<SavedArtifact> {
        let size_bytes = bytes.len();
        self.files.write().await.insert(filename.to_string(), bytes);

        Ok(SavedArtifact {
            filename: filename.to_string(),
            location: format!("memory://{}", filename),
            size_bytes,
        })
    }
}
