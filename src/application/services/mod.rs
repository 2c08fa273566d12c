mod diagnosis_service;
mod health_reporter;
mod pipeline_error;
mod scratch_lease;
mod speech_service;
mod speech_text;
mod transcription_service;
mod upload_policy;

pub use diagnosis_service::{
    DIAGNOSIS_INSTRUCTION, DiagnosisService, build_prompt, image_mime_type,
};
pub use health_reporter::{HealthReport, HealthReporter, HealthStatus};
pub use pipeline_error::{ErrorKind, PipelineError};
pub use scratch_lease::ScratchLease;
pub use speech_service::SpeechService;
pub use speech_text::normalize_for_speech;
pub use transcription_service::TranscriptionService;
pub use upload_policy::{UploadError, UploadPolicy};
