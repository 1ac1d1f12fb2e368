use async_trait::async_trait;

use replyr_core::EngineError;

use crate::prompt::ChatPrompt;

/// One completion request to the language-model API.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Low temperature keeps the category label stable; the token bound
    /// covers a short reply plus the JSON envelope.
    pub fn from_prompt(prompt: ChatPrompt) -> Self {
        Self { system: prompt.system, user: prompt.user, temperature: 0.4, max_tokens: 200 }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EngineError>;
}
