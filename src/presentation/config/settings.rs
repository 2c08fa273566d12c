use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::UploadPolicy;
use crate::infrastructure::audio::SpeechProvider;

use super::Environment;

const ENV_PREFIX: &str = "APP";

/// Flat variable names from earlier deployments, mapped onto settings keys.
const LEGACY_VARIABLES: [(&str, &str); 8] = [
    ("GROQ_API_KEY", "groq.api_key"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("MAX_FILE_SIZE", "uploads.max_file_size"),
    ("UPLOAD_DIR", "storage.upload_dir"),
    ("TEMP_AUDIO_DIR", "storage.temp_audio_dir"),
    ("VISION_MODEL", "vision.model"),
    ("STT_MODEL", "transcription.model"),
];

const LEGACY_LIST_VARIABLES: [(&str, &str); 2] = [
    ("ALLOWED_EXTENSIONS", "uploads.image_extensions"),
    ("AUDIO_EXTENSIONS", "uploads.audio_extensions"),
];

/// Room for multipart framing and text fields on top of the file ceiling.
const MULTIPART_HEADROOM_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub groq: GroqSettings,
    pub vision: VisionSettings,
    pub transcription: TranscriptionSettings,
    pub speech: SpeechSettings,
    pub uploads: UploadSettings,
    pub storage: StorageSettings,
    pub outbound: OutboundSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub model: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProviderSetting {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub provider: SpeechProviderSetting,
    pub language: String,
    pub tld: String,
    pub model: String,
    pub voice: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size: u64,
    pub image_extensions: Vec<String>,
    pub audio_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_dir: String,
    pub temp_audio_dir: String,
    pub stale_after_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutboundSettings {
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from_vars(environment, std::env::vars().collect())
    }

    /// Same layering as [`Settings::load`] but reading variables from `vars`.
    pub fn load_from_vars(
        environment: Environment,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("app.name", "AI Doctor")?
            .set_default("app.version", env!("CARGO_PKG_VERSION"))?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("groq.api_key", "")?
            .set_default("groq.base_url", "https://api.groq.com/openai/v1")?
            .set_default("vision.model", "meta-llama/llama-4-scout-17b-16e-instruct")?
            .set_default("vision.max_tokens", 500)?
            .set_default("vision.temperature", 0.7)?
            .set_default("transcription.model", "whisper-large-v3")?
            .set_default("transcription.language", "en")?
            .set_default("speech.provider", "google")?
            .set_default("speech.language", "en")?
            .set_default("speech.tld", "com")?
            .set_default("speech.model", "playai-tts")?
            .set_default("speech.voice", "Fritz-PlayAI")?
            .set_default("uploads.max_file_size", 5 * 1024 * 1024)?
            .set_default(
                "uploads.image_extensions",
                vec![".jpg", ".jpeg", ".png", ".webp"],
            )?
            .set_default(
                "uploads.audio_extensions",
                vec![".mp3", ".wav", ".m4a", ".ogg", ".webm", ".flac"],
            )?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("storage.temp_audio_dir", "temp_audio")?
            .set_default("storage.stale_after_hours", 24)?
            .set_default("outbound.timeout_seconds", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("uploads.image_extensions")
                    .with_list_parse_key("uploads.audio_extensions")
                    .try_parsing(true)
                    .source(Some(vars.clone().into_iter().collect())),
            );

        for (variable, key) in LEGACY_VARIABLES {
            if let Some(value) = vars.get(variable) {
                builder = builder.set_override(key, value.clone())?;
            }
        }

        for (variable, key) in LEGACY_LIST_VARIABLES {
            if let Some(value) = vars.get(variable) {
                builder = builder.set_override(key, split_list(value))?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(
            self.uploads.image_extensions.iter(),
            self.uploads.audio_extensions.iter(),
            self.uploads.max_file_size,
        )
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.outbound.timeout_seconds.max(1))
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.storage.stale_after_hours * 3600)
    }

    pub fn max_request_bytes(&self) -> usize {
        usize::try_from(self.uploads.max_file_size)
            .unwrap_or(usize::MAX)
            .saturating_add(MULTIPART_HEADROOM_BYTES)
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.upload_dir)
    }

    pub fn temp_audio_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.temp_audio_dir)
    }

    pub fn has_api_key(&self) -> bool {
        !self.groq.api_key.trim().is_empty()
    }

    pub fn api_key(&self) -> Option<String> {
        self.has_api_key().then(|| self.groq.api_key.clone())
    }

    pub fn speech_provider(&self) -> SpeechProvider {
        match self.speech.provider {
            SpeechProviderSetting::Google => SpeechProvider::Google,
            SpeechProviderSetting::OpenAi => SpeechProvider::OpenAi,
        }
    }

    pub fn speech_base_url(&self) -> String {
        self.speech
            .base_url
            .clone()
            .unwrap_or_else(|| self.groq.base_url.clone())
    }

    /// Readiness of each collaborator as far as configuration can tell.
    pub fn service_checks(&self) -> Vec<(&'static str, bool)> {
        let speech_ready = match self.speech.provider {
            SpeechProviderSetting::Google => !self.speech.tld.trim().is_empty(),
            SpeechProviderSetting::OpenAi => self.has_api_key(),
        };

        vec![
            ("groq_api", self.has_api_key()),
            ("vision_model", !self.vision.model.trim().is_empty()),
            ("transcription_model", !self.transcription.model.trim().is_empty()),
            ("speech_synthesis", speech_ready),
            ("file_upload", !self.storage.upload_dir.trim().is_empty()),
        ]
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
