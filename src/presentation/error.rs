use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{ErrorKind, PipelineError, UploadError};

/// HTTP status for every pipeline failure class.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingFile => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::ModelError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::AudioProcessingError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::MissingFile => "missing_file",
        ErrorKind::InvalidFileType => "invalid_file_type",
        ErrorKind::FileTooLarge => "file_too_large",
        ErrorKind::ModelError => "model_error",
        ErrorKind::AudioProcessingError => "audio_processing_error",
        ErrorKind::Timeout => "timeout",
        ErrorKind::Internal => "internal",
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub details: Value,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: json!({}),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// For failures with nothing useful to tell the caller.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// `operation` prefixes server-side failures, e.g. "Analysis" gives
    /// "Analysis failed: ...". Client input errors keep their own message.
    pub fn from_pipeline(operation: &str, error: PipelineError) -> Self {
        let kind = error.kind();
        let status = status_for(kind);

        let mut details = match &error {
            PipelineError::Upload(UploadError::InvalidFileType { extension, allowed }) => json!({
                "extension": extension,
                "allowed_extensions": allowed,
            }),
            PipelineError::Upload(UploadError::FileTooLarge {
                size_bytes,
                max_bytes,
            }) => json!({
                "size_bytes": size_bytes,
                "max_file_size_bytes": max_bytes,
            }),
            _ => json!({}),
        };
        details["kind"] = json!(kind_label(kind));

        if kind.is_client_error() {
            tracing::warn!(kind = kind_label(kind), error = %error, "{operation} rejected");
            Self {
                status,
                message: error.to_string(),
                details,
            }
        } else {
            tracing::error!(kind = kind_label(kind), error = %error, "{operation} failed");
            Self {
                status,
                message: format!("{operation} failed: {error}"),
                details,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            details: self.details,
            status_code: self.status.as_u16(),
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
