use std::sync::Arc;

use crate::application::ports::{
    ScratchStore, SpeechSynthesizer, TranscriptionEngine, VisionModel,
};
use crate::application::services::{
    DiagnosisService, HealthReporter, SpeechService, TranscriptionService,
};
use crate::presentation::config::Settings;

#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// Outbound adapters the services are wired against.
pub struct Collaborators {
    pub vision_model: Arc<dyn VisionModel>,
    pub transcription_engine: Arc<dyn TranscriptionEngine>,
    pub speech_synthesizer: Arc<dyn SpeechSynthesizer>,
    pub upload_store: Arc<dyn ScratchStore>,
    pub audio_store: Arc<dyn ScratchStore>,
}

#[derive(Clone)]
pub struct AppState {
    pub diagnosis_service: Arc<DiagnosisService>,
    pub transcription_service: Arc<TranscriptionService>,
    pub speech_service: Arc<SpeechService>,
    pub health_reporter: Arc<HealthReporter>,
    pub app_info: AppInfo,
    pub max_file_size: u64,
    pub max_request_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings, collaborators: Collaborators) -> Self {
        let policy = settings.upload_policy();
        let policy_ceiling = policy.max_file_size();
        let call_timeout = settings.call_timeout();

        let diagnosis_service = DiagnosisService::new(
            collaborators.vision_model,
            Arc::clone(&collaborators.upload_store),
            policy.clone(),
            call_timeout,
        );
        let transcription_service = TranscriptionService::new(
            collaborators.transcription_engine,
            collaborators.upload_store,
            policy,
            settings.transcription.language.clone(),
            call_timeout,
        );
        let speech_service = SpeechService::new(
            collaborators.speech_synthesizer,
            collaborators.audio_store,
            settings.speech.language.clone(),
            call_timeout,
        );

        Self {
            diagnosis_service: Arc::new(diagnosis_service),
            transcription_service: Arc::new(transcription_service),
            speech_service: Arc::new(speech_service),
            health_reporter: Arc::new(HealthReporter::new(settings.service_checks())),
            app_info: AppInfo {
                name: settings.app.name.clone(),
                version: settings.app.version.clone(),
            },
            max_file_size: policy_ceiling,
            max_request_bytes: settings.max_request_bytes(),
        }
    }
}
