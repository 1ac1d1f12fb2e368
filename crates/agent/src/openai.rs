//! OpenAI-compatible chat-completions adapter.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use replyr_core::{EngineError, UpstreamService};

use crate::llm::{CompletionRequest, LlmClient};

pub struct OpenAiChatClient {
    http: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(http: Client, api_key: SecretString, base_url: String, model: String) -> Self {
        Self { http, api_key, base_url: base_url.trim_end_matches('/').to_string(), model }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn request_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatCompletionBody<'a> {
    ChatCompletionBody {
        model,
        messages: vec![
            ChatMessage { role: "system", content: &request.system },
            ChatMessage { role: "user", content: &request.user },
        ],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        response_format: ResponseFormat { kind: "json_object" },
    }
}

#[async_trait]
impl LlmClient for OpenAiChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EngineError> {
        let url = self.completions_url();
        let body = request_body(&self.model, request);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                let detail = if error.is_timeout() {
                    format!("chat completion timed out: {error}")
                } else {
                    format!("chat completion request failed: {error}")
                };
                EngineError::upstream(UpstreamService::Model, detail)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::upstream(
                UpstreamService::Model,
                format!("chat completion returned {status}"),
            ));
        }

        let envelope: ChatCompletionEnvelope = response.json().await.map_err(|error| {
            EngineError::upstream(
                UpstreamService::Model,
                format!("failed to decode chat completion envelope: {error}"),
            )
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!(model = %self.model, chars = content.len(), "chat completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;

    use crate::llm::CompletionRequest;
    use crate::prompt::ChatPrompt;

    use super::{request_body, OpenAiChatClient};

    fn sample_request() -> CompletionRequest {
        CompletionRequest::from_prompt(ChatPrompt {
            system: "system text".to_string(),
            user: "user text".to_string(),
        })
    }

    #[test]
    fn request_body_matches_the_chat_completions_shape() {
        let request = sample_request();
        let body = request_body("gpt-4o-mini", &request);
        let json = serde_json::to_value(&body).expect("body serializes");

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "system text");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "user text");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 200);
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let client = OpenAiChatClient::new(
            Client::new(),
            "sk-test".to_string().into(),
            "https://api.openai.com/v1/".to_string(),
            "gpt-4o-mini".to_string(),
        );
        assert_eq!(client.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn envelope_decodes_first_choice_content() {
        let envelope: super::ChatCompletionEnvelope = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"{\"reply\":\"hi\"}"}}]}"#,
        )
        .expect("envelope decodes");

        let content =
            envelope.choices.into_iter().next().and_then(|choice| choice.message.content);
        assert_eq!(content.as_deref(), Some("{\"reply\":\"hi\"}"));
    }
}
