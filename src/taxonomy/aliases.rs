//! Alias table for tolerant grounding.
//!
//! Keys are compact forms: lowercase, with spaces, underscores, hyphens and
//! dots removed (see [`crate::grounding::compact`]). This table plus the
//! four-character stem rule is the complete tolerance of the grounding
//! validator; anything not covered here falls back to the registry default.
//!
//! Word containment skips a member or alias written right after "not",
//! "no", "non" or "never": "not critical" names no severity and falls back
//! to the default, which leaves the classification ungrounded.
//!
//! Several keys are the labels the first version of the triage prompt asked
//! the model for ("Tech Support", "Billing", "Follow-up", "Pass_to_RPA"), so
//! replies shaped by that vocabulary still ground.

use super::{ActionType, Department, Severity};

pub const DEPARTMENT_ALIASES: &[(&str, Department)] = &[
    // Finance
    ("finances", Department::Finance),
    ("financial", Department::Finance),
    ("accounting", Department::Finance),
    ("accounts", Department::Finance),
    ("accountspayable", Department::Finance),
    ("accountsreceivable", Department::Finance),
    ("billing", Department::Finance),
    ("treasury", Department::Finance),
    ("erp", Department::Finance),
    // Sales
    ("salesteam", Department::Sales),
    ("commercial", Department::Sales),
    ("businessdevelopment", Department::Sales),
    ("presales", Department::Sales),
    ("accountmanagement", Department::Sales),
    // IT
    ("informationtechnology", Department::IT),
    ("techsupport", Department::IT),
    ("technicalsupport", Department::IT),
    ("itsupport", Department::IT),
    ("itdepartment", Department::IT),
    ("helpdesk", Department::IT),
    ("servicedesk", Department::IT),
    // HR
    ("humanresources", Department::HR),
    ("people", Department::HR),
    ("peopleops", Department::HR),
    ("peopleoperations", Department::HR),
    ("personnel", Department::HR),
    ("recruiting", Department::HR),
    ("payroll", Department::HR),
    // Facilities
    ("facility", Department::Facilities),
    ("maintenance", Department::Facilities),
    ("building", Department::Facilities),
    ("buildings", Department::Facilities),
    ("officemanagement", Department::Facilities),
    ("workplace", Department::Facilities),
];

pub const SEVERITY_ALIASES: &[(&str, Severity)] = &[
    // Low
    ("minor", Severity::Low),
    ("trivial", Severity::Low),
    ("lowpriority", Severity::Low),
    ("p4", Severity::Low),
    ("sev4", Severity::Low),
    // Medium
    ("med", Severity::Medium),
    ("moderate", Severity::Medium),
    ("normal", Severity::Medium),
    ("mediumpriority", Severity::Medium),
    ("p3", Severity::Medium),
    ("sev3", Severity::Medium),
    // High
    ("urgent", Severity::High),
    ("major", Severity::High),
    ("severe", Severity::High),
    ("highpriority", Severity::High),
    ("p2", Severity::High),
    ("sev2", Severity::High),
    // Critical
    ("blocker", Severity::Critical),
    ("emergency", Severity::Critical),
    ("showstopper", Severity::Critical),
    ("p1", Severity::Critical),
    ("p0", Severity::Critical),
    ("sev1", Severity::Critical),
    ("sev0", Severity::Critical),
];

pub const ACTION_ALIASES: &[(&str, ActionType)] = &[
    // InformationRequest
    ("question", ActionType::InformationRequest),
    ("inquiry", ActionType::InformationRequest),
    ("enquiry", ActionType::InformationRequest),
    ("info", ActionType::InformationRequest),
    ("information", ActionType::InformationRequest),
    ("howto", ActionType::InformationRequest),
    // ServiceRequest
    ("request", ActionType::ServiceRequest),
    ("accessrequest", ActionType::ServiceRequest),
    ("changerequest", ActionType::ServiceRequest),
    ("followup", ActionType::ServiceRequest),
    ("documentationupdate", ActionType::ServiceRequest),
    // IncidentReport
    ("incident", ActionType::IncidentReport),
    ("outage", ActionType::IncidentReport),
    ("bug", ActionType::IncidentReport),
    ("defect", ActionType::IncidentReport),
    ("bugreport", ActionType::IncidentReport),
    ("passtorpa", ActionType::IncidentReport),
    // Other
    ("none", ActionType::Other),
    ("misc", ActionType::Other),
    ("miscellaneous", ActionType::Other),
    ("general", ActionType::Other),
];
