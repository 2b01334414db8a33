//! LLM port - Interface for remote chat completion providers

use async_trait::async_trait;

use crate::domain::value_objects::AiProvider;

/// One system instruction plus one user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for text completion. Exactly one completion string comes back, or
/// an error.
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    async fn complete(
        &self,
        provider: AiProvider,
        api_key: &str,
        request: CompletionRequest,
    ) -> Result<String, LlmError>;
}
