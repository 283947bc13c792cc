//! Triage engine: the single inbound operation.
//!
//! `triage` wires requester → validator → routing → dispatcher and drives
//! the ticket lifecycle alongside. Each call is independent; the engine
//! holds only read-only shared state and can be used from many tasks at
//! once.

use crate::classifier::factory::create_classifier;
use crate::classifier::{ClassificationAgent, ClassificationRequester, ClassifierError};
use crate::config::{LoggingConfig, TriageConfig};
use crate::dispatch::{ActionDispatcher, ActionOutcome};
use crate::error::TriageError;
use crate::grounding::{GroundingValidator, ValidatedClassification};
use crate::logging::{generate_ticket_id, ticket_preview};
use crate::routing::{route, RoutingDecision, TicketLifecycle, TicketState, TransitionRecord};
use crate::taxonomy::TaxonomyRegistry;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Opaque ticket identifier assigned at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh UUID v4 id.
    pub fn generate() -> Self {
        Self(generate_ticket_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TicketId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Everything the caller learns about one ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TriageResult {
    pub ticket_id: TicketId,
    pub triaged_at: DateTime<Utc>,
    pub decision: RoutingDecision,
    pub action_outcome: ActionOutcome,
    pub lifecycle: Vec<TransitionRecord>,
    /// Produced from registry defaults after the classifier failed.
    pub degraded: bool,
}

impl TriageResult {
    pub fn classification(&self) -> &ValidatedClassification {
        self.decision.classification()
    }
}

/// Classification, grounding, routing and dispatch for single tickets.
#[derive(Clone)]
pub struct TriageEngine {
    registry: Arc<TaxonomyRegistry>,
    requester: ClassificationRequester,
    validator: GroundingValidator,
    dispatcher: ActionDispatcher,
    logging: LoggingConfig,
}

impl TriageEngine {
    pub fn new(
        registry: Arc<TaxonomyRegistry>,
        requester: ClassificationRequester,
        dispatcher: ActionDispatcher,
    ) -> Self {
        Self {
            validator: GroundingValidator::new(Arc::clone(&registry)),
            registry,
            requester,
            dispatcher,
            logging: LoggingConfig::default(),
        }
    }

    /// Build an engine around an existing classifier, taking everything else
    /// from configuration.
    pub fn with_agent(agent: Arc<dyn ClassificationAgent>, config: &TriageConfig) -> Self {
        Self::with_agent_and_client(agent, config, Arc::new(Client::new()))
    }

    fn with_agent_and_client(
        agent: Arc<dyn ClassificationAgent>,
        config: &TriageConfig,
        client: Arc<Client>,
    ) -> Self {
        let registry = Arc::new(config.taxonomy.registry());
        let requester = ClassificationRequester::new(
            agent,
            Arc::clone(&registry),
            config.classifier.max_ticket_chars,
        );
        let dispatcher = ActionDispatcher::from_config(&config.dispatch, client);
        let mut engine = Self::new(registry, requester, dispatcher);
        engine.logging = config.logging.clone();
        engine
    }

    /// Build the engine, classifier included, from configuration.
    pub fn from_config(config: &TriageConfig) -> Result<Self, ClassifierError> {
        let client = Arc::new(Client::new());
        let agent = create_classifier(&config.classifier, Arc::clone(&client))?;
        Ok(Self::with_agent_and_client(agent, config, client))
    }

    pub fn registry(&self) -> &Arc<TaxonomyRegistry> {
        &self.registry
    }

    pub fn classifier(&self) -> &Arc<dyn ClassificationAgent> {
        self.requester.agent()
    }

    pub fn escalation_target(&self) -> &'static str {
        self.dispatcher.escalation_target()
    }

    /// Triage one ticket.
    ///
    /// Fails only on invalid input or classifier failure; dispatch failures
    /// are reported in [`TriageResult::action_outcome`].
    pub async fn triage(
        &self,
        ticket_text: &str,
        ticket_id: TicketId,
    ) -> Result<TriageResult, TriageError> {
        let start = Instant::now();
        if let Some(preview) = ticket_preview(ticket_text, &self.logging) {
            tracing::debug!(ticket_id = %ticket_id, preview = %preview, "ticket received");
        }

        let mut lifecycle = TicketLifecycle::new();
        let raw = self.requester.request(ticket_text).await?;
        let classification = self.validator.validate(&raw);
        lifecycle.advance(
            TicketState::Classified,
            Some(if classification.grounded() {
                "grounded"
            } else {
                "ungrounded"
            }),
        )?;

        self.finish(ticket_id, classification, lifecycle, false, start)
            .await
    }

    /// Route a ticket with registry defaults after a total classifier failure.
    ///
    /// The classification is explicitly ungrounded and the result is marked
    /// `degraded`.
    pub async fn triage_degraded(&self, ticket_id: TicketId) -> Result<TriageResult, TriageError> {
        let start = Instant::now();
        let mut lifecycle = TicketLifecycle::new();
        let classification = self.validator.degraded();
        lifecycle.advance(TicketState::Classified, Some("degraded"))?;

        self.finish(ticket_id, classification, lifecycle, true, start)
            .await
    }

    /// Reject input that would fail before classification.
    pub fn check_input(&self, ticket_text: &str) -> Result<(), TriageError> {
        self.requester.check_input(ticket_text)?;
        Ok(())
    }

    async fn finish(
        &self,
        ticket_id: TicketId,
        classification: ValidatedClassification,
        mut lifecycle: TicketLifecycle,
        degraded: bool,
        start: Instant,
    ) -> Result<TriageResult, TriageError> {
        let decision = route(&classification);
        lifecycle.advance(TicketState::Routed, Some(decision.reason_code().as_str()))?;
        crate::metrics::record_ticket_routed(
            decision.branch().as_str(),
            decision.reason_code().as_str(),
        );

        let action_outcome = self.dispatcher.dispatch(&ticket_id, &decision).await;
        lifecycle.advance(
            TicketState::Dispatched,
            Some(if action_outcome.success {
                "success"
            } else {
                "failed"
            }),
        )?;

        tracing::info!(
            ticket_id = %ticket_id,
            department = %classification.department(),
            severity = %classification.severity(),
            action = %classification.action(),
            branch = %decision.branch(),
            reason_code = %decision.reason_code(),
            grounded = classification.grounded(),
            degraded,
            dispatched = action_outcome.success,
            latency_ms = start.elapsed().as_millis() as u64,
            "ticket triaged"
        );

        Ok(TriageResult {
            ticket_id,
            triaged_at: Utc::now(),
            decision,
            action_outcome,
            lifecycle: lifecycle.into_transitions(),
            degraded,
        })
    }
}
