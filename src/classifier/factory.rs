//! Classifier factory: build a [`ClassificationAgent`] from configuration.

use super::{
    google::GeminiClassifier, openai::OpenAIClassifier, ClassificationAgent, ClassifierError,
};
use crate::config::{ClassifierConfig, ClassifierProvider};
use reqwest::Client;
use std::sync::Arc;

/// Create a classifier from configuration.
///
/// The API key is read from the environment variable named by
/// `api_key_env`. Gemini requires a key; OpenAI-compatible endpoints may run
/// without one (local servers).
///
/// # Examples
///
/// ```
/// use triage::classifier::factory::create_classifier;
/// use triage::config::{ClassifierConfig, ClassifierProvider};
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let config = ClassifierConfig {
///     provider: ClassifierProvider::OpenAI,
///     base_url: Some("http://localhost:11434".to_string()),
///     model: Some("llama3.2".to_string()),
///     api_key_env: Some("TRIAGE_DOCTEST_UNSET_KEY".to_string()),
///     ..Default::default()
/// };
/// let classifier = create_classifier(&config, Arc::new(Client::new())).unwrap();
/// assert_eq!(classifier.provider(), "openai");
/// ```
pub fn create_classifier(
    config: &ClassifierConfig,
    client: Arc<Client>,
) -> Result<Arc<dyn ClassificationAgent>, ClassifierError> {
    let key_var = config.api_key_env();
    let api_key = std::env::var(key_var).ok().filter(|k| !k.trim().is_empty());

    match config.provider {
        ClassifierProvider::Gemini => {
            let api_key = api_key.ok_or_else(|| {
                ClassifierError::Configuration(format!(
                    "Gemini classifier requires an API key in env var '{}'",
                    key_var
                ))
            })?;
            Ok(Arc::new(GeminiClassifier::new(
                config.base_url().to_string(),
                config.model().to_string(),
                api_key,
                config.temperature,
                config.timeout(),
                client,
            )))
        }
        ClassifierProvider::OpenAI => Ok(Arc::new(OpenAIClassifier::new(
            config.base_url().to_string(),
            config.model().to_string(),
            api_key,
            config.temperature,
            config.timeout(),
            client,
        ))),
    }
}
