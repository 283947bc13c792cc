//! Ticket triage - classify support tickets with an external model, force
//! the reply into a closed taxonomy, and route each ticket to standard
//! logging or critical escalation.
//!
//! The pipeline for one ticket is
//! [`ClassificationRequester`](classifier::ClassificationRequester) →
//! [`GroundingValidator`](grounding::GroundingValidator) →
//! [`route`](routing::route) →
//! [`ActionDispatcher`](dispatch::ActionDispatcher), driven by
//! [`TriageEngine`](engine::TriageEngine).

pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod grounding;
pub mod logging;
pub mod metrics;
pub mod policy;
pub mod routing;
pub mod taxonomy;
