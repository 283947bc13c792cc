//! OpenAI-compatible classifier (OpenAI, vLLM, Ollama, LM Studio, ...).

use super::parse::parse_classification;
use super::{ClassificationAgent, ClassificationPrompt, ClassifierError, RawClassification};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Classifier backed by POST /v1/chat/completions.
///
/// The API key is optional so local OpenAI-compatible servers work without
/// one; when present it is sent as a Bearer token.
pub struct OpenAIClassifier {
    /// Base URL (e.g., "https://api.openai.com")
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    timeout: Duration,
    client: Arc<Client>,
}

impl OpenAIClassifier {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
        temperature: f32,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            temperature,
            timeout,
            client,
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a ClassificationPrompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.ticket_text,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ClassificationAgent for OpenAIClassifier {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(
        &self,
        prompt: &ClassificationPrompt,
    ) -> Result<RawClassification, ClassifierError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        tracing::debug!(provider = "openai", model = %self.model, "requesting classification");

        let start = std::time::Instant::now();
        let mut req = self
            .client
            .post(&url)
            .json(&self.build_request(prompt))
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClassifierError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::info!(
                provider = "openai",
                model = %self.model,
                status = %status,
                latency_ms = start.elapsed().as_millis(),
                "classification request failed"
            );
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(timeout_ms)
            } else {
                ClassifierError::InvalidResponse(format!("Failed to parse OpenAI response: {}", e))
            }
        })?;

        tracing::debug!(
            provider = "openai",
            model = %self.model,
            latency_ms = start.elapsed().as_millis(),
            "classification reply received"
        );

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ClassifierError::InvalidResponse("no choices in response".into()))?;

        parse_classification(&content)
    }
}
