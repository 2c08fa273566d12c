use async_trait::async_trait;

use crate::domain::AudioFormat;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError>;

    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech engine not configured: {0}")]
    NotConfigured(String),
    #[error("nothing to synthesize")]
    EmptyInput,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("synthesizer returned no audio")]
    EmptyAudio,
}
