use std::future::Future;
use std::time::Duration;

use crate::application::ports::ScratchStoreError;

use super::upload_policy::UploadError;

/// Failure classes a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    InvalidFileType,
    FileTooLarge,
    ModelError,
    AudioProcessingError,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile | Self::InvalidFileType | Self::FileTooLarge
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("{0}")]
    Model(String),
    #[error("{0}")]
    AudioProcessing(String),
    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: &'static str, seconds: u64 },
    #[error("failed to stage file: {0}")]
    Storage(#[from] ScratchStoreError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Upload(UploadError::MissingFile) => ErrorKind::MissingFile,
            Self::Upload(UploadError::InvalidFileType { .. }) => ErrorKind::InvalidFileType,
            Self::Upload(UploadError::FileTooLarge { .. }) => ErrorKind::FileTooLarge,
            Self::Model(_) => ErrorKind::ModelError,
            Self::AudioProcessing(_) => ErrorKind::AudioProcessingError,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Awaits an outbound call, giving up after `limit`.
pub(crate) async fn bounded<F, T>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, call).await.map_err(|_| {
        tracing::error!(operation, timeout_secs = limit.as_secs(), "Outbound call timed out");
        PipelineError::Timeout {
            operation,
            seconds: limit.as_secs(),
        }
    })
}
