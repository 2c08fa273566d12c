use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ScratchStore, ScratchStoreError};
use crate::domain::ScratchPath;

/// Scratch files kept in a directory on local disk.
pub struct LocalScratchStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
}

impl LocalScratchStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ScratchStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ScratchStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| ScratchStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root: base_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl ScratchStore for LocalScratchStore {
    async fn put(&self, path: &ScratchPath, data: &[u8]) -> Result<u64, ScratchStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data.to_vec()))
            .await
            .map_err(|e| ScratchStoreError::WriteFailed(e.to_string()))?;
        Ok(data.len() as u64)
    }

    async fn fetch(&self, path: &ScratchPath) -> Result<Vec<u8>, ScratchStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| ScratchStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ScratchStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &ScratchPath) -> Result<(), ScratchStoreError> {
        let store_path = StorePath::from(path.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(path = %path, "Scratch file already gone");
                Ok(())
            }
            Err(e) => Err(ScratchStoreError::DeleteFailed(e.to_string())),
        }
    }

    async fn sweep(&self, max_age: Duration) -> Result<usize, ScratchStoreError> {
        let max_age = chrono::Duration::from_std(max_age)
            .map_err(|e| ScratchStoreError::ListFailed(e.to_string()))?;
        let cutoff = Utc::now() - max_age;

        let entries: Vec<_> = self
            .inner
            .list(None)
            .try_collect()
            .await
            .map_err(|e| ScratchStoreError::ListFailed(e.to_string()))?;

        let mut removed = 0;
        for meta in entries.into_iter().filter(|m| m.last_modified <= cutoff) {
            match self.inner.delete(&meta.location).await {
                Ok(()) => {
                    removed += 1;
                    tracing::info!(path = %meta.location, "Removed stale scratch file");
                }
                Err(e) => {
                    tracing::warn!(path = %meta.location, error = %e, "Failed to remove stale scratch file");
                }
            }
        }

        Ok(removed)
    }
}
