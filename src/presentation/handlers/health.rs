use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<String, bool>,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = state.health_reporter.status();

    Json(HealthResponse {
        status: report.status.as_str().to_string(),
        version: state.app_info.version.clone(),
        timestamp: Utc::now(),
        services: report.services,
    })
}
