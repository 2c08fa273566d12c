pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Environment, Settings, SpeechProviderSetting};
pub use error::{ApiError, ErrorResponse};
pub use router::create_router;
pub use state::{AppInfo, AppState, Collaborators};
