//! Classification requester.
//!
//! Turns ticket text into a [`RawClassification`] by calling an external
//! text-classification service. Providers implement [`ClassificationAgent`];
//! [`ClassificationRequester`] owns input validation and prompt building so
//! every provider sees the same, already-checked request.
//!
//! Nothing in this module trusts the reply: values are passed through as
//! raw strings for the grounding validator.

pub mod error;
pub mod factory;
pub mod google;
pub mod openai;
pub mod parse;
pub mod prompt;
pub mod types;

pub use error::ClassifierError;
pub use types::{ClassificationPrompt, RawClassification};

use crate::error::{TriageError, ValidationError};
use crate::taxonomy::TaxonomyRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// A provider of ticket classifications.
///
/// Object-safe; used as `Arc<dyn ClassificationAgent>`. Dropping the
/// returned future aborts the in-flight HTTP request.
#[async_trait]
pub trait ClassificationAgent: Send + Sync + 'static {
    /// Provider tag for logs and metrics (e.g., "gemini").
    fn provider(&self) -> &str;

    /// Model identifier sent to the service.
    fn model(&self) -> &str;

    /// Issue one classification call. No retries.
    ///
    /// - `Err(ClassifierError::Network | Timeout)` if the service is unreachable
    /// - `Err(ClassifierError::Upstream)` on a non-2xx status
    /// - `Err(ClassifierError::InvalidResponse)` if the reply lacks any of
    ///   department, severity or action
    async fn classify(
        &self,
        prompt: &ClassificationPrompt,
    ) -> Result<RawClassification, ClassifierError>;
}

/// Validates ticket text and requests a raw classification.
#[derive(Clone)]
pub struct ClassificationRequester {
    agent: Arc<dyn ClassificationAgent>,
    registry: Arc<TaxonomyRegistry>,
    max_ticket_chars: usize,
}

impl ClassificationRequester {
    pub fn new(
        agent: Arc<dyn ClassificationAgent>,
        registry: Arc<TaxonomyRegistry>,
        max_ticket_chars: usize,
    ) -> Self {
        Self {
            agent,
            registry,
            max_ticket_chars,
        }
    }

    pub fn agent(&self) -> &Arc<dyn ClassificationAgent> {
        &self.agent
    }

    /// Reject input the service should never see.
    pub fn check_input<'a>(&self, ticket_text: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = ticket_text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicket);
        }
        let length = trimmed.chars().count();
        if length > self.max_ticket_chars {
            return Err(ValidationError::TicketTooLong {
                length,
                max: self.max_ticket_chars,
            });
        }
        Ok(trimmed)
    }

    /// Validate the text, then make exactly one classification call.
    pub async fn request(&self, ticket_text: &str) -> Result<RawClassification, TriageError> {
        let text = self.check_input(ticket_text)?;
        let prompt = ClassificationPrompt::build(&self.registry, text);

        let start = Instant::now();
        let result = self.agent.classify(&prompt).await;
        let elapsed = start.elapsed();
        crate::metrics::record_classification_duration(self.agent.provider(), elapsed);

        match result {
            Ok(raw) => {
                tracing::debug!(
                    provider = self.agent.provider(),
                    latency_ms = elapsed.as_millis() as u64,
                    department_raw = %raw.department_raw,
                    severity_raw = %raw.severity_raw,
                    action_raw = %raw.action_raw,
                    "raw classification received"
                );
                Ok(raw)
            }
            Err(e) => {
                crate::metrics::record_classifier_error(e.error_type());
                tracing::warn!(
                    provider = self.agent.provider(),
                    model = self.agent.model(),
                    latency_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "classification failed"
                );
                Err(TriageError::ExternalService(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAgent {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClassificationAgent for CountingAgent {
        fn provider(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "test"
        }

        async fn classify(
            &self,
            prompt: &ClassificationPrompt,
        ) -> Result<RawClassification, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.ticket_text.contains("fail") {
                return Err(ClassifierError::Timeout(30_000));
            }
            Ok(RawClassification::new("IT", "Low", "Other", prompt.ticket_text.clone()))
        }
    }

    fn requester(max: usize) -> (ClassificationRequester, Arc<CountingAgent>) {
        let agent = Arc::new(CountingAgent {
            calls: AtomicUsize::new(0),
        });
        let requester = ClassificationRequester::new(
            agent.clone(),
            Arc::new(TaxonomyRegistry::default()),
            max,
        );
        (requester, agent)
    }

    #[tokio::test]
    async fn test_empty_ticket_makes_no_call() {
        let (requester, agent) = requester(100);

        for text in ["", "   ", "\n\t "] {
            let err = requester.request(text).await.unwrap_err();
            assert!(matches!(
                err,
                TriageError::Validation(ValidationError::EmptyTicket)
            ));
        }
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_too_long_ticket_makes_no_call() {
        let (requester, agent) = requester(10);

        let err = requester.request("x".repeat(11).as_str()).await.unwrap_err();
        assert!(matches!(
            err,
            TriageError::Validation(ValidationError::TicketTooLong { length: 11, max: 10 })
        ));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_text_is_trimmed_before_call() {
        let (requester, agent) = requester(100);

        let raw = requester.request("  printer jam \n").await.unwrap();
        assert_eq!(raw.rationale, "printer jam");
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_failure_is_external_error() {
        let (requester, agent) = requester(100);

        let err = requester.request("please fail").await.unwrap_err();
        assert!(matches!(err, TriageError::ExternalService(ClassifierError::Timeout(_))));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let (requester, _) = requester(3);
        assert!(requester.check_input("äöü").is_ok());
        assert!(requester.check_input("äöüß").is_err());
    }
}
