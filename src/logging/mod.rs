//! Structured logging helpers
//!
//! Filter construction for `tracing-subscriber`, ticket id generation, and
//! privacy-safe ticket previews.

pub mod fields;
pub mod ids;

pub use fields::ticket_preview;
pub use ids::generate_ticket_id;

/// Build filter directives string from LoggingConfig
///
/// Produces `base_level,triage::component=level,...` for `EnvFilter`.
///
/// # Examples
///
/// ```
/// use triage::config::logging::{LogFormat, LoggingConfig};
/// use triage::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("grounding".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
///     preview_chars: 80,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,triage::grounding=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",triage::{}={}", component, level));
        }
    }

    filter_str
}
