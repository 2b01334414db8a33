//! Image generation client for an OpenAI-images-compatible endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{ImageGenerationError, ImageGenerationPort};
use crate::domain::value_objects::GeneratedImage;

/// Client for `POST /v1/images/generations`
pub struct ImageGenClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ImageGenClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

impl From<reqwest::Error> for ImageGenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

#[async_trait]
impl ImageGenerationPort for ImageGenClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ImageGenerationError::Api("no image API key configured".to_string()))?;

        let request = GenerationRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: "1024x1024",
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ImageGenerationError::Api(error_text));
        }

        let body: GenerationResponse = response.json().await?;
        first_image(body)
    }
}

fn first_image(body: GenerationResponse) -> Result<GeneratedImage, ImageGenerationError> {
    let image = body
        .data
        .into_iter()
        .next()
        .ok_or(ImageGenerationError::NoImage)?;
    match (image.url, image.b64_json) {
        (Some(url), _) => Ok(GeneratedImage::Url { url }),
        (None, Some(base64)) => Ok(GeneratedImage::Data {
            mime_type: "image/png".to_string(),
            base64,
        }),
        (None, None) => Err(ImageGenerationError::NoImage),
    }
}
