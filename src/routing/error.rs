//! Error types for lifecycle violations

use super::state::TicketState;
use thiserror::Error;

/// A lifecycle transition outside `Received → Classified → Routed → Dispatched`.
///
/// Internal invariant: the engine drives the lifecycle in order and never
/// produces this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Illegal state transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: TicketState,
    pub to: TicketState,
}
