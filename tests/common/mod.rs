//! Shared test utilities for triage integration tests.
//!
//! Provides a scriptable classifier plus engine and router builders so tests
//! never reach a real classification service.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use triage::api::{create_router, AppState};
use triage::classifier::{
    ClassificationAgent, ClassificationPrompt, ClassifierError, RawClassification,
};
use triage::config::TriageConfig;
use triage::engine::TriageEngine;

/// UUID v4 string length: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
pub const UUID_V4_STRING_LEN: usize = 36;

type Reply = Box<dyn Fn(usize) -> Result<RawClassification, ClassifierError> + Send + Sync>;

/// Classifier double that answers from a closure and records every call.
pub struct FakeClassifier {
    reply: Reply,
    calls: AtomicUsize,
    tickets: Mutex<Vec<String>>,
}

impl FakeClassifier {
    /// Always answer with the given raw values.
    pub fn replying(department: &str, severity: &str, action: &str) -> Arc<Self> {
        let raw = RawClassification::new(department, severity, action, "fake rationale");
        Self::with(move |_| Ok(raw.clone()))
    }

    /// Always fail with a 503 from the service.
    pub fn unavailable() -> Arc<Self> {
        Self::with(|_| {
            Err(ClassifierError::Upstream {
                status: 503,
                message: "service unavailable".to_string(),
            })
        })
    }

    /// Answer with `reply(call_index)`; the first call has index 0.
    pub fn with(
        reply: impl Fn(usize) -> Result<RawClassification, ClassifierError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            tickets: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Ticket texts as the classifier received them.
    pub fn tickets(&self) -> Vec<String> {
        self.tickets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassificationAgent for FakeClassifier {
    fn provider(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn classify(
        &self,
        prompt: &ClassificationPrompt,
    ) -> Result<RawClassification, ClassifierError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.tickets.lock().unwrap().push(prompt.ticket_text.clone());
        (self.reply)(index)
    }
}

/// Engine around `classifier` with default configuration.
pub fn make_engine(classifier: Arc<FakeClassifier>) -> TriageEngine {
    make_engine_with_config(classifier, &TriageConfig::default())
}

pub fn make_engine_with_config(
    classifier: Arc<FakeClassifier>,
    config: &TriageConfig,
) -> TriageEngine {
    TriageEngine::with_agent(classifier, config)
}

/// Router around `classifier` with the given configuration.
pub fn make_app(classifier: Arc<FakeClassifier>, config: TriageConfig) -> axum::Router {
    let engine = make_engine_with_config(classifier, &config);
    let state = Arc::new(AppState::from_engine(engine, Arc::new(config)));
    create_router(state)
}

/// Configuration with retries disabled, so failure tests run without backoff.
pub fn no_retry_config() -> TriageConfig {
    let mut config = TriageConfig::default();
    config.classifier.max_retries = 0;
    config
}
