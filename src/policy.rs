//! Boundary policy for classifier failures.
//!
//! The engine makes exactly one classification call per ticket. Callers at
//! the edge (HTTP, CLI) go through [`BoundaryPolicy::submit`], which retries
//! external service errors and then either surfaces the error or routes the
//! ticket through the degraded path, as configured.

use crate::config::{ClassifierConfig, FailurePolicy};
use crate::engine::{TicketId, TriageEngine, TriageResult};
use crate::error::TriageError;
use std::time::Duration;

const RETRY_BACKOFF: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPolicy {
    pub max_retries: u32,
    pub on_failure: FailurePolicy,
    pub backoff: Duration,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            on_failure: FailurePolicy::Reject,
            backoff: RETRY_BACKOFF,
        }
    }
}

impl BoundaryPolicy {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            on_failure: config.on_failure,
            backoff: RETRY_BACKOFF,
        }
    }

    /// Triage with retries and the configured failure policy.
    ///
    /// Validation errors are returned immediately. Backoff grows linearly
    /// with the attempt number.
    pub async fn submit(
        &self,
        engine: &TriageEngine,
        ticket_text: &str,
        ticket_id: TicketId,
    ) -> Result<TriageResult, TriageError> {
        let mut attempt = 0;
        loop {
            match engine.triage(ticket_text, ticket_id.clone()).await {
                Err(TriageError::ExternalService(e)) => {
                    if attempt < self.max_retries {
                        attempt += 1;
                        tracing::info!(
                            ticket_id = %ticket_id,
                            attempt,
                            max_retries = self.max_retries,
                            error = %e,
                            "retrying classification"
                        );
                        tokio::time::sleep(self.backoff * attempt).await;
                        continue;
                    }

                    return match self.on_failure {
                        FailurePolicy::Reject => Err(TriageError::ExternalService(e)),
                        FailurePolicy::Degraded => {
                            tracing::warn!(
                                ticket_id = %ticket_id,
                                error = %e,
                                "classifier unavailable, routing with defaults"
                            );
                            engine.triage_degraded(ticket_id).await
                        }
                    };
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{
        ClassificationAgent, ClassificationPrompt, ClassifierError, RawClassification,
    };
    use crate::config::TriageConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyAgent {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ClassificationAgent for FlakyAgent {
        fn provider(&self) -> &str {
            "flaky"
        }

        fn model(&self) -> &str {
            "flaky"
        }

        async fn classify(
            &self,
            _prompt: &ClassificationPrompt,
        ) -> Result<RawClassification, ClassifierError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(ClassifierError::Upstream {
                    status: 503,
                    message: "busy".into(),
                })
            } else {
                Ok(RawClassification::new("Sales", "Low", "InformationRequest", ""))
            }
        }
    }

    fn setup(failures: u32) -> (TriageEngine, Arc<FlakyAgent>) {
        let agent = Arc::new(FlakyAgent {
            failures,
            calls: AtomicU32::new(0),
        });
        let engine = TriageEngine::with_agent(agent.clone(), &TriageConfig::default());
        (engine, agent)
    }

    fn policy(max_retries: u32, on_failure: FailurePolicy) -> BoundaryPolicy {
        BoundaryPolicy {
            max_retries,
            on_failure,
            backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let (engine, agent) = setup(1);
        let result = policy(1, FailurePolicy::Reject)
            .submit(&engine, "pricing question", TicketId::new("T-1"))
            .await
            .unwrap();

        assert!(!result.degraded);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reject_after_retries_exhausted() {
        let (engine, agent) = setup(10);
        let err = policy(2, FailurePolicy::Reject)
            .submit(&engine, "pricing question", TicketId::new("T-2"))
            .await
            .unwrap_err();

        assert!(matches!(err, TriageError::ExternalService(_)));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_degraded_after_retries_exhausted() {
        let (engine, agent) = setup(10);
        let result = policy(0, FailurePolicy::Degraded)
            .submit(&engine, "pricing question", TicketId::new("T-3"))
            .await
            .unwrap();

        assert!(result.degraded);
        assert!(!result.classification().grounded());
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_error_not_retried_or_degraded() {
        let (engine, agent) = setup(0);
        let err = policy(3, FailurePolicy::Degraded)
            .submit(&engine, "", TicketId::new("T-4"))
            .await
            .unwrap_err();

        assert!(matches!(err, TriageError::Validation(_)));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_from_config() {
        let config = ClassifierConfig {
            max_retries: 4,
            on_failure: FailurePolicy::Degraded,
            ..Default::default()
        };
        let policy = BoundaryPolicy::from_config(&config);
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.on_failure, FailurePolicy::Degraded);
    }
}
