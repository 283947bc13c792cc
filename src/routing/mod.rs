//! Routing: branch selection and the ticket lifecycle.
//!
//! [`route`] is a pure function of the validated classification. The
//! escalation rule is evaluated top to bottom and the first match wins:
//!
//! | # | condition                                   | branch               | reason                     |
//! |---|---------------------------------------------|----------------------|----------------------------|
//! | 1 | severity is Critical                        | `CriticalEscalation` | `severity_critical`        |
//! | 2 | severity is High and action is IncidentReport | `CriticalEscalation` | `severity_high_incident`   |
//! | 3 | not grounded and severity rank >= High      | `CriticalEscalation` | `ungrounded_high_severity` |
//! | 4 | otherwise                                   | `StandardLogging`    | `default_standard`         |

pub mod error;
pub mod state;

pub use error::IllegalTransition;
pub use state::{TicketLifecycle, TicketState, TransitionRecord};

use crate::grounding::ValidatedClassification;
use crate::taxonomy::{ActionType, Severity, TaxonomyRegistry};
use serde::Serialize;
use std::fmt;

/// Downstream handler a ticket is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Routine ledger entry
    StandardLogging,
    /// Urgent RPA escalation
    CriticalEscalation,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::StandardLogging => "standard_logging",
            Branch::CriticalEscalation => "critical_escalation",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which row of the escalation rule decided the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    SeverityCritical,
    SeverityHighIncident,
    UngroundedHighSeverity,
    DefaultStandard,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::SeverityCritical => "severity_critical",
            ReasonCode::SeverityHighIncident => "severity_high_incident",
            ReasonCode::UngroundedHighSeverity => "ungrounded_high_severity",
            ReasonCode::DefaultStandard => "default_standard",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final routing decision for one ticket. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    branch: Branch,
    classification: ValidatedClassification,
    reason_code: ReasonCode,
}

impl RoutingDecision {
    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn classification(&self) -> &ValidatedClassification {
        &self.classification
    }

    pub fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    pub fn is_escalation(&self) -> bool {
        self.branch == Branch::CriticalEscalation
    }
}

/// Decide the branch for a validated classification.
///
/// Total and deterministic: the same classification always yields an equal
/// decision.
pub fn route(classification: &ValidatedClassification) -> RoutingDecision {
    let (branch, reason_code) = escalation_rule(
        classification.severity(),
        classification.action(),
        classification.grounded(),
    );
    RoutingDecision {
        branch,
        classification: classification.clone(),
        reason_code,
    }
}

fn escalation_rule(severity: Severity, action: ActionType, grounded: bool) -> (Branch, ReasonCode) {
    let high = TaxonomyRegistry::rank(Severity::High);

    if severity == Severity::Critical {
        (Branch::CriticalEscalation, ReasonCode::SeverityCritical)
    } else if severity == Severity::High && action == ActionType::IncidentReport {
        (Branch::CriticalEscalation, ReasonCode::SeverityHighIncident)
    } else if !grounded && TaxonomyRegistry::rank(severity) >= high {
        (Branch::CriticalEscalation, ReasonCode::UngroundedHighSeverity)
    } else {
        (Branch::StandardLogging, ReasonCode::DefaultStandard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RawClassification;
    use crate::grounding::GroundingValidator;
    use std::sync::Arc;

    fn validate(dept: &str, sev: &str, action: &str) -> ValidatedClassification {
        GroundingValidator::new(Arc::new(TaxonomyRegistry::default()))
            .validate(&RawClassification::new(dept, sev, action, ""))
    }

    #[test]
    fn test_critical_always_escalates() {
        let decision = route(&validate("HR", "Critical", "InformationRequest"));
        assert_eq!(decision.branch(), Branch::CriticalEscalation);
        assert_eq!(decision.reason_code(), ReasonCode::SeverityCritical);
    }

    #[test]
    fn test_high_incident_escalates() {
        let decision = route(&validate("IT", "High", "IncidentReport"));
        assert_eq!(decision.branch(), Branch::CriticalEscalation);
        assert_eq!(decision.reason_code(), ReasonCode::SeverityHighIncident);
    }

    #[test]
    fn test_high_grounded_service_request_is_standard() {
        let decision = route(&validate("IT", "High", "ServiceRequest"));
        assert_eq!(decision.branch(), Branch::StandardLogging);
        assert_eq!(decision.reason_code(), ReasonCode::DefaultStandard);
    }

    #[test]
    fn test_ungrounded_high_escalates() {
        // Department falls back to the default, so the whole classification is ungrounded.
        let classification = validate("Legal", "High", "ServiceRequest");
        assert!(!classification.grounded());

        let decision = route(&classification);
        assert_eq!(decision.branch(), Branch::CriticalEscalation);
        assert_eq!(decision.reason_code(), ReasonCode::UngroundedHighSeverity);
    }

    #[test]
    fn test_ungrounded_medium_is_standard() {
        let decision = route(&validate("Legal", "Medium", "ServiceRequest"));
        assert_eq!(decision.branch(), Branch::StandardLogging);
    }

    #[test]
    fn test_misspelled_critical_fails_safe() {
        let classification = validate("IT", "Crittical", "IncidentReport");
        assert_eq!(classification.severity(), Severity::Critical);
        assert!(!classification.grounded());

        let decision = route(&classification);
        assert_eq!(decision.branch(), Branch::CriticalEscalation);
    }

    #[test]
    fn test_low_is_standard() {
        let decision = route(&validate("HR", "Low", "InformationRequest"));
        assert_eq!(decision.branch(), Branch::StandardLogging);
        assert!(!decision.is_escalation());
        assert_eq!(decision.classification().department().to_string(), "HR");
    }

    #[test]
    fn test_decision_serializes_snake_case() {
        let decision = route(&validate("Finance", "Critical", "IncidentReport"));
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["branch"], "critical_escalation");
        assert_eq!(json["reason_code"], "severity_critical");
    }

    mod proptests {
        use super::*;
        use crate::taxonomy::{Department, Member};
        use proptest::prelude::*;

        /// Valid classifications built through the validator; `spoil` makes the
        /// department ungrounded without touching severity or action.
        fn classification() -> impl Strategy<Value = ValidatedClassification> {
            (
                0..Department::ALL.len(),
                0..Severity::ALL.len(),
                0..ActionType::ALL.len(),
                any::<bool>(),
            )
                .prop_map(|(d, s, a, spoil)| {
                    let dept = if spoil {
                        "zzzz"
                    } else {
                        Department::ALL[d].as_str()
                    };
                    validate(dept, Severity::ALL[s].as_str(), ActionType::ALL[a].as_str())
                })
        }

        proptest! {
            #[test]
            fn prop_routing_is_idempotent(c in classification()) {
                let decision = route(&c);
                prop_assert_eq!(&decision, &route(&c));
                prop_assert_eq!(decision.classification(), &c);
            }

            #[test]
            fn prop_escalation_is_monotonic_in_severity(
                a in 0..ActionType::ALL.len(),
                lo in 0..Severity::ALL.len(),
                hi in 0..Severity::ALL.len(),
                spoil in any::<bool>(),
            ) {
                prop_assume!(lo <= hi);
                let dept = if spoil { "zzzz" } else { "Sales" };
                let action = ActionType::ALL[a].as_str();
                let lower = route(&validate(dept, Severity::ALL[lo].as_str(), action));
                let higher = route(&validate(dept, Severity::ALL[hi].as_str(), action));

                if lower.is_escalation() {
                    prop_assert!(higher.is_escalation());
                }
            }

            #[test]
            fn prop_critical_always_escalates(c in classification()) {
                if c.severity() == Severity::Critical {
                    prop_assert_eq!(route(&c).branch(), Branch::CriticalEscalation);
                }
            }
        }
    }
}
