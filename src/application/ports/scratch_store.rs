use std::io;
use std::time::Duration;

use crate::domain::ScratchPath;

/// Flat namespace of short-lived files.
#[async_trait::async_trait]
pub trait ScratchStore: Send + Sync {
    /// Writes all of `data`; the file is complete once this returns.
    async fn put(&self, path: &ScratchPath, data: &[u8]) -> Result<u64, ScratchStoreError>;

    async fn fetch(&self, path: &ScratchPath) -> Result<Vec<u8>, ScratchStoreError>;

    async fn delete(&self, path: &ScratchPath) -> Result<(), ScratchStoreError>;

    /// Removes entries last modified more than `max_age` ago and returns how many went.
    async fn sweep(&self, max_age: Duration) -> Result<usize, ScratchStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("listing failed: {0}")]
    ListFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
