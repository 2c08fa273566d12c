use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ScratchStore, TranscriptionEngine};
use crate::domain::{AssetCategory, UploadedAsset};

use super::pipeline_error::{PipelineError, bounded};
use super::scratch_lease::ScratchLease;
use super::upload_policy::{UploadError, UploadPolicy};

pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
    scratch_store: Arc<dyn ScratchStore>,
    policy: UploadPolicy,
    language: String,
    call_timeout: Duration,
}

impl TranscriptionService {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        scratch_store: Arc<dyn ScratchStore>,
        policy: UploadPolicy,
        language: String,
        call_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            scratch_store,
            policy,
            language,
            call_timeout,
        }
    }

    #[tracing::instrument(
        skip(self, asset),
        fields(filename = ?asset.filename, bytes = asset.size_bytes())
    )]
    pub async fn transcribe(&self, asset: UploadedAsset) -> Result<String, PipelineError> {
        if asset.category != AssetCategory::Audio {
            return Err(PipelineError::Upload(UploadError::InvalidFileType {
                extension: asset.extension(),
                allowed: self.policy.allowed_extensions(AssetCategory::Audio).to_vec(),
            }));
        }

        let extension = self.policy.validate(&asset).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected audio upload");
        })?;

        let lease =
            ScratchLease::acquire(Arc::clone(&self.scratch_store), &extension, &asset.data)
                .await?;
        let outcome = self.run(&lease).await;
        lease.release().await;

        let transcript = outcome?;
        tracing::info!(chars = transcript.len(), "Audio transcription completed");
        Ok(transcript)
    }

    async fn run(&self, lease: &ScratchLease) -> Result<String, PipelineError> {
        let audio = lease
            .read()
            .await
            .map_err(|e| PipelineError::Model(format!("Failed to read audio: {e}")))?;

        bounded(
            "audio transcription",
            self.call_timeout,
            self.engine
                .transcribe(&audio, lease.path().as_str(), &self.language),
        )
        .await?
        .map_err(|e| {
            tracing::error!(error = %e, "Transcription engine call failed");
            PipelineError::Model(e.to_string())
        })
    }
}
