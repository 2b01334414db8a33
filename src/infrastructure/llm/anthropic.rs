//! Anthropic messages client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{non_empty, send_json};
use crate::application::ports::outbound::{CompletionRequest, LlmError};

pub const ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
}

impl AnthropicClient {
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
        let body = MessagesRequest {
            model: ANTHROPIC_MODEL,
            max_tokens: request.max_tokens,
            system: &request.system_prompt,
            messages: vec![Message {
                role: "user",
                content: &request.user_message,
            }],
        };

        let response: MessagesResponse = send_json(
            self.client
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body),
        )
        .await?;

        first_text(response)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

fn first_text(response: MessagesResponse) -> Result<String, LlmError> {
    non_empty(response.content.into_iter().next().and_then(|b| b.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_first_content_block() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Stunned loses actions."}],"stop_reason":"end_turn"}"#,
        )
        .expect("valid json");
        assert_eq!(first_text(response).expect("text"), "Stunned loses actions.");
    }

    #[test]
    fn test_error_shaped_body_is_invalid_response() {
        let response: MessagesResponse =
            serde_json::from_str(r#"{"type":"error","error":{"message":"bad key"}}"#)
                .expect("valid json");
        assert!(matches!(first_text(response), Err(LlmError::InvalidResponse(_))));
    }
}
