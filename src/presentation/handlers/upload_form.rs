use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::application::services::{PipelineError, UploadError};
use crate::domain::{AssetCategory, UploadedAsset};
use crate::presentation::error::ApiError;

pub const FILE_FIELD: &str = "file";

/// Multipart body split into the uploaded file and any text fields.
pub struct UploadForm {
    pub asset: UploadedAsset,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(
        mut multipart: Multipart,
        category: AssetCategory,
        operation: &str,
        max_file_size: u64,
    ) -> Result<Self, ApiError> {
        let mut asset = None;
        let mut fields = HashMap::new();

        let read_error =
            |e: MultipartError| multipart_error(e, operation, max_file_size);

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let filename = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(read_error)?;
                tracing::debug!(filename = ?filename, bytes = data.len(), "Upload received");
                asset = Some(UploadedAsset::new(filename, category, data));
            } else {
                let value = field.text().await.map_err(read_error)?;
                fields.insert(name, value);
            }
        }

        Ok(Self {
            asset: asset.unwrap_or_else(|| UploadedAsset::new(None, category, Vec::new())),
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn multipart_error(error: MultipartError, operation: &str, max_file_size: u64) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::from_pipeline(
            operation,
            PipelineError::Upload(UploadError::FileTooLarge {
                size_bytes: None,
                max_bytes: max_file_size,
            }),
        );
    }

    tracing::warn!(error = %error, "Failed to read multipart body");
    ApiError::new(
        error.status(),
        format!("Failed to read multipart: {}", error.body_text()),
    )
}
