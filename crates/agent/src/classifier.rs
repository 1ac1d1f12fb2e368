//! Strict classification of model completions.
//!
//! The completion must be a JSON object carrying a non-empty reply and one
//! of the five category labels. Anything else is rejected; there is no
//! fallback category.

use async_trait::async_trait;
use serde::Deserialize;

use replyr_core::{Category, ClassificationResult, Comment, EngineError};

use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::PromptBuilder;

/// Capability interface for comment classification.
///
/// Stubs implement this in tests so the orchestrator never needs a live
/// model endpoint.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, comment: &Comment) -> Result<ClassificationResult, EngineError>;
}

/// Production classifier: prompt construction, one model call, strict parse.
pub struct LlmClassifier<C> {
    client: C,
    prompts: PromptBuilder,
}

impl<C> LlmClassifier<C>
where
    C: LlmClient,
{
    pub fn new(client: C, prompts: PromptBuilder) -> Self {
        Self { client, prompts }
    }
}

#[async_trait]
impl<C> Classifier for LlmClassifier<C>
where
    C: LlmClient,
{
    async fn classify(&self, comment: &Comment) -> Result<ClassificationResult, EngineError> {
        let prompt = self.prompts.build(comment)?;
        let request = CompletionRequest::from_prompt(prompt);
        let raw = self.client.complete(&request).await?;
        parse_completion(&raw)
    }
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    reply: String,
    category: String,
}

/// Parse a completion into a classification result.
///
/// Accepts an optional Markdown code fence around the JSON, nothing more.
pub fn parse_completion(raw: &str) -> Result<ClassificationResult, EngineError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(EngineError::parse("model returned an empty completion"));
    }

    let parsed: RawClassification = serde_json::from_str(body).map_err(|error| {
        EngineError::parse(format!(
            "completion is not a JSON object with reply and category: {error}"
        ))
    })?;

    let category: Category = parsed.category.parse()?;
    let reply = parsed.reply.trim();
    if reply.is_empty() {
        return Err(EngineError::parse("completion contained an empty reply"));
    }

    Ok(ClassificationResult { reply: reply.to_string(), category })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
