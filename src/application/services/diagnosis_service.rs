use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::{ScratchStore, VisionModel, VisionRequest};
use crate::domain::{AssetCategory, DiagnosisResult, UploadedAsset};

use super::pipeline_error::{PipelineError, bounded};
use super::scratch_lease::ScratchLease;
use super::upload_policy::{UploadError, UploadPolicy};

pub const DIAGNOSIS_INSTRUCTION: &str = "You are a medical assistant reviewing a photo a patient has shared, \
together with any symptoms they describe.

When answering:
- Describe what you observe in plain, professional terms.
- Suggest reasonable remedies or next steps.
- Recommend seeing a healthcare professional whenever the issue could be serious.
- Answer in two or three sentences of empathetic, patient-friendly language.
- Open with \"Based on what I observe...\" and do not use markdown.

This guidance is educational and does not replace a professional medical opinion.";

/// Builds the single text part sent alongside the image.
pub fn build_prompt(symptoms: Option<&str>) -> String {
    match symptoms {
        Some(symptoms) => format!(
            "{DIAGNOSIS_INSTRUCTION}\n\nPatient's described symptoms: {symptoms}"
        ),
        None => DIAGNOSIS_INSTRUCTION.to_string(),
    }
}

pub fn image_mime_type(extension: &str) -> &'static str {
    match extension.trim_start_matches('.') {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

pub struct DiagnosisService {
    vision_model: Arc<dyn VisionModel>,
    scratch_store: Arc<dyn ScratchStore>,
    policy: UploadPolicy,
    call_timeout: Duration,
}

impl DiagnosisService {
    pub fn new(
        vision_model: Arc<dyn VisionModel>,
        scratch_store: Arc<dyn ScratchStore>,
        policy: UploadPolicy,
        call_timeout: Duration,
    ) -> Self {
        Self {
            vision_model,
            scratch_store,
            policy,
            call_timeout,
        }
    }

    #[tracing::instrument(
        skip(self, asset, symptoms),
        fields(filename = ?asset.filename, bytes = asset.size_bytes())
    )]
    pub async fn analyze(
        &self,
        asset: UploadedAsset,
        symptoms: Option<&str>,
    ) -> Result<DiagnosisResult, PipelineError> {
        if asset.category != AssetCategory::Image {
            return Err(PipelineError::Upload(UploadError::InvalidFileType {
                extension: asset.extension(),
                allowed: self.policy.allowed_extensions(AssetCategory::Image).to_vec(),
            }));
        }

        let extension = self.policy.validate(&asset).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected image upload");
        })?;

        let symptoms = symptoms.filter(|s| !s.is_empty());

        let lease =
            ScratchLease::acquire(Arc::clone(&self.scratch_store), &extension, &asset.data)
                .await?;
        let outcome = self.describe(&lease, &extension, symptoms).await;
        lease.release().await;

        let text = outcome?;
        tracing::info!(
            chars = text.len(),
            with_symptoms = symptoms.is_some(),
            "Image analysis completed"
        );

        Ok(DiagnosisResult::from_model_text(text, symptoms.is_some()))
    }

    async fn describe(
        &self,
        lease: &ScratchLease,
        extension: &str,
        symptoms: Option<&str>,
    ) -> Result<String, PipelineError> {
        let image = lease
            .read()
            .await
            .map_err(|e| PipelineError::Model(format!("Failed to process image: {e}")))?;

        let request = VisionRequest {
            prompt: build_prompt(symptoms),
            image_base64: general_purpose::STANDARD.encode(&image),
            mime_type: image_mime_type(extension).to_string(),
        };

        bounded(
            "image analysis",
            self.call_timeout,
            self.vision_model.describe(&request),
        )
        .await?
        .map_err(|e| {
            tracing::error!(error = %e, "Vision model call failed");
            PipelineError::Model(e.to_string())
        })
    }
}
