//! Taxonomy defaults configuration

use crate::taxonomy::{ActionType, Department, Severity, TaxonomyRegistry};
use serde::{Deserialize, Serialize};

/// Designated fallback members, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub default_department: Department,
    pub default_severity: Severity,
    pub default_action: ActionType,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        let registry = TaxonomyRegistry::default();
        Self {
            default_department: registry.default_department(),
            default_severity: registry.default_severity(),
            default_action: registry.default_action(),
        }
    }
}

impl TaxonomyConfig {
    pub fn registry(&self) -> TaxonomyRegistry {
        TaxonomyRegistry::new(
            self.default_department,
            self.default_severity,
            self.default_action,
        )
    }
}
