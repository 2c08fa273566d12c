use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub diagnosis: &'static str,
    pub audio: &'static str,
    pub transcribe: &'static str,
}

#[derive(Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub description: &'static str,
    pub endpoints: Endpoints,
}

pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: state.app_info.name.clone(),
        version: state.app_info.version.clone(),
        description: "AI-powered medical diagnosis API",
        endpoints: Endpoints {
            health: "/health/",
            diagnosis: "/api/diagnosis/analyze",
            audio: "/api/diagnosis/audio-response",
            transcribe: "/api/diagnosis/transcribe",
        },
    })
}
