use std::sync::Arc;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

use super::google_tts_engine::GoogleTtsEngine;
use super::openai_speech_engine::OpenAiSpeechEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeechProvider {
    Google,
    OpenAi,
}

pub struct SpeechEngineFactory;

impl SpeechEngineFactory {
    pub fn create(
        provider: SpeechProvider,
        tld: &str,
        api_key: Option<String>,
        base_url: String,
        model: &str,
        voice: &str,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
        match provider {
            SpeechProvider::Google => Ok(Arc::new(GoogleTtsEngine::new(tld))),
            SpeechProvider::OpenAi => {
                let key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
                    SynthesisError::NotConfigured(
                        "API key required for OpenAI-compatible speech".to_string(),
                    )
                })?;
                Ok(Arc::new(OpenAiSpeechEngine::new(
                    key,
                    base_url,
                    model.to_string(),
                    voice.to_string(),
                )))
            }
        }
    }
}
