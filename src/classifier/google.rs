//! Google Gemini classifier.

use super::parse::parse_classification;
use super::{ClassificationAgent, ClassificationPrompt, ClassifierError, RawClassification};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Classifier backed by the Gemini `generateContent` API.
///
/// - POST /v1beta/models/{model}:generateContent (key in `x-goog-api-key`)
/// - System instruction in `systemInstruction`, ticket as the user turn
/// - JSON mode via `responseMimeType` plus a `responseSchema` whose enums
///   are the registry members
pub struct GeminiClassifier {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,
    model: String,
    /// API key, sent as a header so it never appears in the URL
    api_key: String,
    temperature: f32,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl GeminiClassifier {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
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

    fn build_request(&self, prompt: &ClassificationPrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.ticket_text.clone(),
                }],
            }],
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: prompt.system_instruction.clone(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: prompt.response_schema(),
            },
        }
    }

    /// Concatenated text of the first candidate.
    fn reply_text(response: GeminiResponse) -> Result<String, ClassifierError> {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ClassifierError::InvalidResponse(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::InvalidResponse("no candidates in response".into()))?;

        let text = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidResponse(format!(
                "empty candidate (finishReason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiSystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[async_trait]
impl ClassificationAgent for GeminiClassifier {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(
        &self,
        prompt: &ClassificationPrompt,
    ) -> Result<RawClassification, ClassifierError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let timeout_ms = self.timeout.as_millis() as u64;

        tracing::debug!(provider = "gemini", model = %self.model, "requesting classification");

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(prompt))
            .timeout(self.timeout)
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
                provider = "gemini",
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

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(timeout_ms)
            } else {
                ClassifierError::InvalidResponse(format!("Failed to parse Gemini response: {}", e))
            }
        })?;

        tracing::debug!(
            provider = "gemini",
            model = %self.model,
            latency_ms = start.elapsed().as_millis(),
            "classification reply received"
        );

        let text = Self::reply_text(gemini_response)?;
        parse_classification(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::TaxonomyRegistry;
    use mockito::{Matcher, Server};

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn test_classifier(base_url: String) -> GeminiClassifier {
        GeminiClassifier::new(
            base_url,
            "gemini-2.5-flash".to_string(),
            "test-key-123".to_string(),
            0.0,
            Duration::from_secs(5),
            Arc::new(Client::new()),
        )
    }

    fn prompt(text: &str) -> ClassificationPrompt {
        ClassificationPrompt::build(&TaxonomyRegistry::default(), text)
    }

    fn candidate_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_classify_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key-123")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(candidate_body(
                r#"{"department":"Finance","severity":"Critical","action":"IncidentReport","rationale":"ERP outage"}"#,
            ))
            .create_async()
            .await;

        let classifier = test_classifier(server.url());
        let raw = classifier
            .classify(&prompt("The ERP system is down"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(raw.department_raw, "Finance");
        assert_eq!(raw.severity_raw, "Critical");
        assert_eq!(raw.action_raw, "IncidentReport");
        assert_eq!(raw.rationale, "ERP outage");
    }

    #[tokio::test]
    async fn test_request_carries_schema_and_instruction() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Payroll is wrong" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "properties": {
                            "department": { "enum": ["Finance", "Sales", "IT", "HR", "Facilities"] }
                        }
                    }
                }
            })))
            .with_status(200)
            .with_body(candidate_body(
                r#"{"department":"HR","severity":"High","action":"ServiceRequest"}"#,
            ))
            .create_async()
            .await;

        let classifier = test_classifier(server.url());
        classifier
            .classify(&prompt("Payroll is wrong"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_parts_are_concatenated() {
        let mut server = Server::new_async().await;
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "{\"department\":\"Sales\"," },
                    { "text": "\"severity\":\"Low\",\"action\":\"Other\"}" }
                ] }
            }]
        });
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let raw = test_classifier(server.url())
            .classify(&prompt("quote please"))
            .await
            .unwrap();
        assert_eq!(raw.department_raw, "Sales");
    }

    #[tokio::test]
    async fn test_upstream_error_maps_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let err = test_classifier(server.url())
            .classify(&prompt("anything"))
            .await
            .unwrap_err();

        match err {
            ClassifierError::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = test_classifier(server.url())
            .classify(&prompt("anything"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no candidates"));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let err = test_classifier(server.url())
            .classify(&prompt("anything"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_unparseable_candidate_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(candidate_body("I think this is a finance issue."))
            .create_async()
            .await;

        let err = test_classifier(server.url())
            .classify(&prompt("anything"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "invalid_response");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let err = test_classifier("http://127.0.0.1:9".to_string())
            .classify(&prompt("anything"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Network(_) | ClassifierError::Timeout(_)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let classifier = test_classifier("https://example.test/".to_string());
        assert_eq!(classifier.base_url, "https://example.test");
        assert_eq!(classifier.provider(), "gemini");
        assert_eq!(classifier.model(), "gemini-2.5-flash");
    }
}
