use std::sync::Arc;

use crate::application::ports::{ScratchStore, ScratchStoreError};
use crate::domain::ScratchPath;

/// A scratch file that is deleted exactly once.
///
/// Call [`ScratchLease::release`] on every path out of a pipeline. A lease that
/// is dropped unreleased (early return, panic, cancelled future) schedules the
/// delete on the current runtime instead; anything that still slips through is
/// picked up by the startup sweep.
pub struct ScratchLease {
    store: Arc<dyn ScratchStore>,
    path: ScratchPath,
    released: bool,
}

impl ScratchLease {
    pub async fn acquire(
        store: Arc<dyn ScratchStore>,
        extension: &str,
        data: &[u8],
    ) -> Result<Self, ScratchStoreError> {
        let path = ScratchPath::unique(extension);
        let written = store.put(&path, data).await?;
        tracing::debug!(path = %path, bytes = written, "Scratch file written");
        Ok(Self {
            store,
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &ScratchPath {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>, ScratchStoreError> {
        self.store.fetch(&self.path).await
    }

    /// Cleanup failures are logged, never returned.
    pub async fn release(mut self) {
        self.released = true;
        match self.store.delete(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path, "Scratch file released"),
            Err(e) => tracing::warn!(path = %self.path, error = %e, "Failed to remove scratch file"),
        }
    }
}

impl Drop for ScratchLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let store = Arc::clone(&self.store);
        let path = self.path.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.delete(&path).await {
                        tracing::warn!(path = %path, error = %e, "Deferred scratch cleanup failed");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(path = %path, "No runtime for deferred cleanup, leaving file to the sweep");
            }
        }
    }
}
