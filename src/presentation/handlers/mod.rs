mod diagnosis;
mod health;
mod info;
mod upload_form;

pub use diagnosis::{
    DiagnosisResponse, SpeechText, TranscriptionResponse, analyze_handler, audio_response_handler,
    transcribe_handler,
};
pub use health::{HealthResponse, health_handler};
pub use info::{InfoResponse, info_handler};
pub use upload_form::{FILE_FIELD, UploadForm};
