//! Image generation port - text-to-image provider

use async_trait::async_trait;

use crate::domain::value_objects::GeneratedImage;

#[derive(Debug, thiserror::Error)]
pub enum ImageGenerationError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Response contained no image")]
    NoImage,
}

#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError>;
}
