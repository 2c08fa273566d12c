use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::{Form, extract::rejection::FormRejection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AssetCategory;
use crate::infrastructure::observability::summarize_for_log;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

use super::upload_form::UploadForm;

const SYMPTOMS_FIELD: &str = "symptoms";
const TEXT_FIELD: &str = "text";

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub diagnosis: String,
    pub confidence: f64,
    pub solution: String,
    pub timestamp: DateTime<Utc>,
    pub audio_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

fn rejected(status: StatusCode, body_text: String) -> ApiError {
    ApiError::new(status, body_text)
}

fn multipart_rejected(rejection: MultipartRejection) -> ApiError {
    rejected(rejection.status(), rejection.body_text())
}

/// Pipelines run on their own task so a dropped connection cannot cut the
/// remote call or its cleanup short.
async fn detached<F, T>(pipeline: F) -> Result<T, ApiError>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(pipeline).await.map_err(|e| {
        tracing::error!(error = %e, "Pipeline task did not complete");
        ApiError::internal()
    })
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let multipart = multipart.map_err(multipart_rejected)?;
    let form = UploadForm::read(
        multipart,
        AssetCategory::Image,
        "Analysis",
        state.max_file_size,
    )
    .await?;

    let symptoms = form.field(SYMPTOMS_FIELD).map(str::to_string);
    if let Some(symptoms) = symptoms.as_deref() {
        tracing::debug!(symptoms = %summarize_for_log(symptoms), "Symptoms supplied");
    }

    let service = Arc::clone(&state.diagnosis_service);
    let asset = form.asset;
    let result = detached(async move { service.analyze(asset, symptoms.as_deref()).await })
        .await?
        .map_err(|e| ApiError::from_pipeline("Analysis", e))?;

    Ok(Json(DiagnosisResponse {
        diagnosis: result.diagnosis,
        confidence: result.confidence.value(),
        solution: result.solution,
        timestamp: Utc::now(),
        audio_available: result.audio_available,
    }))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let multipart = multipart.map_err(multipart_rejected)?;
    let form = UploadForm::read(
        multipart,
        AssetCategory::Audio,
        "Transcription",
        state.max_file_size,
    )
    .await?;

    let service = Arc::clone(&state.transcription_service);
    let asset = form.asset;
    let transcription = detached(async move { service.transcribe(asset).await })
        .await?
        .map_err(|e| ApiError::from_pipeline("Transcription", e))?;

    Ok(Json(TranscriptionResponse { transcription }))
}

#[derive(Deserialize)]
struct SpeechForm {
    text: Option<String>,
}

/// The `text` field of either a url-encoded or a multipart form.
pub struct SpeechText(pub String);

impl<S> FromRequest<S> for SpeechText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        let text = if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(multipart_rejected)?;
            let mut text = None;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?
            {
                if field.name() == Some(TEXT_FIELD) {
                    text = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| rejected(e.status(), e.body_text()))?,
                    );
                }
            }
            text
        } else {
            let Form(form) = Form::<SpeechForm>::from_request(req, state)
                .await
                .map_err(|r: FormRejection| rejected(r.status(), r.body_text()))?;
            form.text
        };

        text.filter(|t| !t.trim().is_empty())
            .map(SpeechText)
            .ok_or_else(|| ApiError::bad_request("Field 'text' is required"))
    }
}

#[tracing::instrument(skip(state, text))]
pub async fn audio_response_handler(
    State(state): State<AppState>,
    SpeechText(text): SpeechText,
) -> Result<Response, ApiError> {
    tracing::debug!(text = %summarize_for_log(&text), "Audio response requested");

    let service = Arc::clone(&state.speech_service);
    let artifact = detached(async move { service.speak(&text).await })
        .await?
        .map_err(|e| ApiError::from_pipeline("Audio generation", e))?;

    let headers = [
        (CONTENT_TYPE, artifact.format.as_mime().to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename={}", artifact.download_name()),
        ),
    ];

    Ok((StatusCode::OK, headers, artifact.data).into_response())
}
