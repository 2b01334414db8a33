//! Character portrait generation state

use serde::Serialize;

/// Image returned by the text-to-image provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedImage {
    /// Provider hosts the image
    Url { url: String },
    /// Provider returned the image inline
    Data { mime_type: String, base64: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PortraitState {
    #[default]
    Idle,
    Generating {
        prompt: String,
    },
    Ready {
        prompt: String,
        image: GeneratedImage,
    },
    Failed {
        prompt: String,
        message: String,
    },
}

impl PortraitState {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating { .. })
    }
}
