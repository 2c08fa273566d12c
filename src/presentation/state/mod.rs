mod app_state;

pub use app_state::{AppInfo, AppState, Collaborators};
