mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    AppSettings, GroqSettings, LoggingSettings, OutboundSettings, ServerSettings, Settings,
    SpeechProviderSetting, SpeechSettings, StorageSettings, TranscriptionSettings, UploadSettings,
    VisionSettings,
};
