//! Outbound ports - Interfaces that the application requires from external systems

mod content_port;
mod image_port;
mod llm_port;
mod settings_port;

pub use content_port::{ContentRepositoryPort, ContentStats};
pub use image_port::{ImageGenerationError, ImageGenerationPort};
pub use llm_port::{ChatCompletionPort, CompletionRequest, LlmError};
pub use settings_port::{SettingsError, SettingsRepositoryPort};
