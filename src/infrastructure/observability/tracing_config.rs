use crate::presentation::config::{Environment, LoggingSettings};

pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub level: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` switches to JSON output even when the settings do not.
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        let json_env = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
        Self {
            environment,
            json_format: logging.json || json_env,
            level: logging.level.clone(),
        }
    }

    /// Used when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        format!("{},ai_doctor=debug,tower_http=debug", self.level)
    }
}
