//! Taxonomy registry - the closed decision space for ticket classification.
//!
//! Every classification the engine acts on is drawn from the enumerations in
//! this module. The registry itself only carries the designated fallback
//! members; the member sets are compiled in and cannot change at runtime.
//!
//! # Example
//!
//! ```
//! use triage::taxonomy::{Category, Severity, TaxonomyRegistry};
//!
//! let registry = TaxonomyRegistry::default();
//! assert_eq!(registry.members(Category::Severity), &["Low", "Medium", "High", "Critical"]);
//! assert_eq!(registry.default_member(Category::Department), "IT");
//! assert!(TaxonomyRegistry::rank(Severity::Critical) > TaxonomyRegistry::rank(Severity::High));
//! ```

pub mod aliases;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Department,
    Severity,
    ActionType,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Department, Category::Severity, Category::ActionType];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Department => "department",
            Category::Severity => "severity",
            Category::ActionType => "action_type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of one of the closed taxonomy enumerations.
///
/// Implemented by [`Department`], [`Severity`] and [`ActionType`] so the
/// grounding validator can treat all three categories uniformly.
pub trait Member: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// The category this member belongs to.
    const CATEGORY: Category;

    /// Every member, in registry order.
    const ALL: &'static [Self];

    /// Canonical identifier, exactly as presented to the classifier.
    fn as_str(&self) -> &'static str;

    /// Alias table used by tolerant matching, keyed by compact form.
    fn aliases() -> &'static [(&'static str, Self)];

    /// Resolve a canonical identifier (case-sensitive).
    fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == name)
    }
}

/// Department responsible for handling a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Finance,
    Sales,
    IT,
    HR,
    Facilities,
}

impl Member for Department {
    const CATEGORY: Category = Category::Department;
    const ALL: &'static [Self] = &[
        Department::Finance,
        Department::Sales,
        Department::IT,
        Department::HR,
        Department::Facilities,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Department::Finance => "Finance",
            Department::Sales => "Sales",
            Department::IT => "IT",
            Department::HR => "HR",
            Department::Facilities => "Facilities",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        aliases::DEPARTMENT_ALIASES
    }
}

/// Ticket urgency. Variants are declared in ascending order of urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Member for Severity {
    const CATEGORY: Category = Category::Severity;
    const ALL: &'static [Self] = &[
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        aliases::SEVERITY_ALIASES
    }
}

/// What the ticket asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    InformationRequest,
    ServiceRequest,
    IncidentReport,
    Other,
}

impl Member for ActionType {
    const CATEGORY: Category = Category::ActionType;
    const ALL: &'static [Self] = &[
        ActionType::InformationRequest,
        ActionType::ServiceRequest,
        ActionType::IncidentReport,
        ActionType::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ActionType::InformationRequest => "InformationRequest",
            ActionType::ServiceRequest => "ServiceRequest",
            ActionType::IncidentReport => "IncidentReport",
            ActionType::Other => "Other",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        aliases::ACTION_ALIASES
    }
}

macro_rules! display_and_parse {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Case-insensitive parse of the canonical identifier. Used for
        /// configuration values, not for grounding classifier output.
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty as Member>::ALL
                    .iter()
                    .copied()
                    .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        format!(
                            "Invalid {}: '{}' (expected one of: {})",
                            <$ty as Member>::CATEGORY,
                            s,
                            <$ty as Member>::ALL
                                .iter()
                                .map(|m| m.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        )
                    })
            }
        }
    };
}

display_and_parse!(Department);
display_and_parse!(Severity);
display_and_parse!(ActionType);

const DEPARTMENT_NAMES: &[&str] = &["Finance", "Sales", "IT", "HR", "Facilities"];
const SEVERITY_NAMES: &[&str] = &["Low", "Medium", "High", "Critical"];
const ACTION_NAMES: &[&str] = &[
    "InformationRequest",
    "ServiceRequest",
    "IncidentReport",
    "Other",
];

/// Read-only registry of the taxonomy and its designated defaults.
///
/// Built once at startup and shared as `Arc<TaxonomyRegistry>`; it has no
/// interior mutability, so concurrent readers need no locking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyRegistry {
    default_department: Department,
    default_severity: Severity,
    default_action: ActionType,
}

impl TaxonomyRegistry {
    /// Create a registry with explicit fallback members.
    pub fn new(
        default_department: Department,
        default_severity: Severity,
        default_action: ActionType,
    ) -> Self {
        Self {
            default_department,
            default_severity,
            default_action,
        }
    }

    /// Valid identifiers for a category, in registry order.
    pub fn members(&self, category: Category) -> &'static [&'static str] {
        match category {
            Category::Department => DEPARTMENT_NAMES,
            Category::Severity => SEVERITY_NAMES,
            Category::ActionType => ACTION_NAMES,
        }
    }

    /// Designated fallback identifier for a category.
    pub fn default_member(&self, category: Category) -> &'static str {
        match category {
            Category::Department => self.default_department.as_str(),
            Category::Severity => self.default_severity.as_str(),
            Category::ActionType => self.default_action.as_str(),
        }
    }

    /// Ordinal used for severity threshold comparisons (Low = 0).
    pub fn rank(severity: Severity) -> u8 {
        match severity {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    pub fn default_department(&self) -> Department {
        self.default_department
    }

    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }

    pub fn default_action(&self) -> ActionType {
        self.default_action
    }

    /// Typed fallback for any member type.
    pub fn fallback<M: Member>(&self) -> M {
        let name = self.default_member(M::CATEGORY);
        // default_member only ever returns canonical names of M::CATEGORY
        M::from_canonical(name).unwrap_or(M::ALL[0])
    }
}

impl Default for TaxonomyRegistry {
    fn default() -> Self {
        Self::new(Department::IT, Severity::Medium, ActionType::Other)
    }
}
