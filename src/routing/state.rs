//! Ticket lifecycle state machine.
//!
//! Every ticket moves `Received → Classified → Routed → Dispatched`, each
//! state exactly once. `advance()` rejects any other edge and records the
//! accepted ones with their elapsed time.

use super::error::IllegalTransition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketState {
    /// Text accepted, classification not yet requested.
    Received,
    /// Classification grounded into the taxonomy.
    Classified,
    /// Branch decided; the decision is final from here on.
    Routed,
    /// Side effect attempted (successfully or not). Terminal.
    Dispatched,
}

impl TicketState {
    pub fn is_terminal(self) -> bool {
        self == TicketState::Dispatched
    }

    fn next(self) -> Option<TicketState> {
        match self {
            TicketState::Received => Some(TicketState::Classified),
            TicketState::Classified => Some(TicketState::Routed),
            TicketState::Routed => Some(TicketState::Dispatched),
            TicketState::Dispatched => None,
        }
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketState::Received => write!(f, "Received"),
            TicketState::Classified => write!(f, "Classified"),
            TicketState::Routed => write!(f, "Routed"),
            TicketState::Dispatched => write!(f, "Dispatched"),
        }
    }
}

/// A single recorded state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: TicketState,
    pub to: TicketState,
    /// Milliseconds since the ticket was received.
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Lifecycle of one ticket.
#[derive(Debug)]
pub struct TicketLifecycle {
    current: TicketState,
    created_at: Instant,
    transitions: Vec<TransitionRecord>,
}

impl TicketLifecycle {
    /// Start a lifecycle in `Received`.
    pub fn new() -> Self {
        Self {
            current: TicketState::Received,
            created_at: Instant::now(),
            transitions: Vec::with_capacity(3),
        }
    }

    pub fn current(&self) -> TicketState {
        self.current
    }

    /// Move to `to` if it is the next state.
    pub fn advance(
        &mut self,
        to: TicketState,
        reason: Option<&str>,
    ) -> Result<(), IllegalTransition> {
        if self.current.next() != Some(to) {
            return Err(IllegalTransition {
                from: self.current,
                to,
            });
        }

        let record = TransitionRecord {
            from: self.current,
            to,
            elapsed_ms: self.created_at.elapsed().as_millis() as u64,
            reason: reason.map(str::to_string),
        };
        tracing::trace!(from = %record.from, to = %record.to, "ticket state transition");
        self.transitions.push(record);
        self.current = to;
        Ok(())
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn into_transitions(self) -> Vec<TransitionRecord> {
        self.transitions
    }
}

impl Default for TicketLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
