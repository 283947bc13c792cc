//! Field helpers for structured logging

use crate::config::LoggingConfig;

/// Truncated, single-line preview of a ticket for log events.
///
/// Returns `None` unless content logging is enabled. Truncation is on
/// character boundaries and appends `...` when text was cut.
pub fn ticket_preview(text: &str, config: &LoggingConfig) -> Option<String> {
    if !config.enable_content_logging {
        return None;
    }

    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = flat.chars();
    let mut preview: String = chars.by_ref().take(config.preview_chars).collect();
    if chars.next().is_some() {
        preview.push_str("...");
    }
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(preview_chars: usize) -> LoggingConfig {
        LoggingConfig {
            enable_content_logging: true,
            preview_chars,
            ..Default::default()
        }
    }

    #[test]
    fn test_preview_disabled_by_default() {
        assert_eq!(ticket_preview("secret", &LoggingConfig::default()), None);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let preview = ticket_preview("abcdefghij", &enabled(4)).unwrap();
        assert_eq!(preview, "abcd...");
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(ticket_preview("hi", &enabled(80)).unwrap(), "hi");
    }

    #[test]
    fn test_preview_flattens_newlines_and_respects_char_boundaries() {
        let preview = ticket_preview("Zahlung\nfür  März", &enabled(11)).unwrap();
        assert_eq!(preview, "Zahlung für...");
    }
}
