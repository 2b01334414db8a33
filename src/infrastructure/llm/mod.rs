//! Remote chat completion providers
//!
//! Three provider clients share one request/response pipeline and are
//! selected per call by [`ChatProviderRouter`].

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::application::ports::outbound::{ChatCompletionPort, CompletionRequest, LlmError};
use crate::domain::value_objects::AiProvider;

/// Dispatches a completion to the provider chosen in the settings
pub struct ChatProviderRouter {
    openai: OpenAiClient,
    anthropic: AnthropicClient,
    gemini: GeminiClient,
}

impl ChatProviderRouter {
    pub fn new(openai: OpenAiClient, anthropic: AnthropicClient, gemini: GeminiClient) -> Self {
        Self {
            openai,
            anthropic,
            gemini,
        }
    }
}

#[async_trait]
impl ChatCompletionPort for ChatProviderRouter {
    async fn complete(
        &self,
        provider: AiProvider,
        api_key: &str,
        request: CompletionRequest,
    ) -> Result<String, LlmError> {
        match provider {
            AiProvider::OpenAi => self.openai.complete(api_key, &request).await,
            AiProvider::Anthropic => self.anthropic.complete(api_key, &request).await,
            AiProvider::Google => self.gemini.complete(api_key, &request).await,
        }
    }
}

/// Send a prepared request and decode the JSON body
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, LlmError> {
    let response = request
        .send()
        .await
        .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
        return Err(LlmError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))
}

/// Blank completions count as no completion at all
fn non_empty(text: Option<String>) -> Result<String, LlmError> {
    text.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("response contained no completion".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_provider_is_request_failure() {
        // Port 9 (discard) is closed on any sane test host
        let router = ChatProviderRouter::new(
            OpenAiClient::new("http://127.0.0.1:9"),
            AnthropicClient::new("http://127.0.0.1:9"),
            GeminiClient::new("http://127.0.0.1:9"),
        );
        let result = router
            .complete(
                AiProvider::Anthropic,
                "key",
                CompletionRequest::new("system", "question"),
            )
            .await;
        assert!(matches!(result, Err(LlmError::RequestFailed(_))));
    }

    #[test]
    fn test_blank_completion_is_invalid() {
        assert!(matches!(
            non_empty(Some("  ".to_string())),
            Err(LlmError::InvalidResponse(_))
        ));
        assert_eq!(non_empty(Some("ok".to_string())).expect("text"), "ok");
    }
}
