use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ScratchStore, SpeechSynthesizer};
use crate::domain::AudioArtifact;

use super::pipeline_error::{PipelineError, bounded};
use super::scratch_lease::ScratchLease;
use super::speech_text::normalize_for_speech;

pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    scratch_store: Arc<dyn ScratchStore>,
    language: String,
    call_timeout: Duration,
}

impl SpeechService {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        scratch_store: Arc<dyn ScratchStore>,
        language: String,
        call_timeout: Duration,
    ) -> Self {
        Self {
            synthesizer,
            scratch_store,
            language,
            call_timeout,
        }
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn speak(&self, text: &str) -> Result<AudioArtifact, PipelineError> {
        let spoken = normalize_for_speech(text);
        if spoken.is_empty() {
            return Err(PipelineError::AudioProcessing(
                "Failed to generate audio: no speakable text".to_string(),
            ));
        }

        let audio = bounded(
            "speech synthesis",
            self.call_timeout,
            self.synthesizer.synthesize(&spoken, &self.language),
        )
        .await?
        .map_err(|e| {
            tracing::error!(error = %e, "Speech synthesis failed");
            PipelineError::AudioProcessing(format!("Failed to generate audio: {e}"))
        })?;

        let format = self.synthesizer.format();
        let lease = ScratchLease::acquire(
            Arc::clone(&self.scratch_store),
            format.extension(),
            &audio,
        )
        .await
        .map_err(|e| PipelineError::AudioProcessing(format!("Failed to save audio: {e}")))?;

        let read_back = lease.read().await;
        lease.release().await;

        let data = read_back.map_err(|e| {
            PipelineError::AudioProcessing(format!("Failed to read audio file: {e}"))
        })?;

        tracing::info!(bytes = data.len(), "Speech synthesized");
        Ok(AudioArtifact::new(data, format))
    }
}
