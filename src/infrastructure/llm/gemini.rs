//! Google Gemini generateContent client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{non_empty, send_json};
use crate::application::ports::outbound::{CompletionRequest, LlmError};

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        // instruction and question travel in one user part
        let text = format!(
            "{}\n\nUser question: {}",
            request.system_prompt, request.user_message
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &text }],
            }],
        };

        let response: GenerateResponse = send_json(
            self.client
                .post(format!(
                    "{}/v1beta/models/{}:generateContent",
                    self.base_url, GEMINI_MODEL
                ))
                .query(&[("key", api_key)])
                .json(&body),
        )
        .await?;

        first_candidate(response)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn first_candidate(response: GenerateResponse) -> Result<String, LlmError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);
    non_empty(text)
}
