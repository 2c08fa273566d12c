use async_trait::async_trait;

/// A single image-understanding request.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: String,
    pub image_base64: String,
    pub mime_type: String,
}

impl VisionRequest {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_base64)
    }
}

#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn describe(&self, request: &VisionRequest) -> Result<String, VisionModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisionModelError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned no content")]
    EmptyResponse,
}
