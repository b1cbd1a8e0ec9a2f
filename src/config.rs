//! Configuration types.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default knowledge base location, relative to the working directory.
const DEFAULT_KB_PATH: &str = "knowledge_base.json";

/// How many history turns the intent classifier sees.
const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Sampling temperature for user-facing responses.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// OpenAI API key.
    pub api_key: SecretString,
    /// Chat model used for responses and intent classification.
    pub model: String,
    /// Path to the product knowledge base JSON file.
    pub knowledge_base_path: PathBuf,
    /// Number of history turns shown to the intent classifier.
    pub history_window: usize,
    /// Sampling temperature for user-facing responses.
    pub temperature: f32,
    /// Dump resolved intent / lead / turn count after each turn.
    pub debug: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            model: DEFAULT_MODEL.to_string(),
            knowledge_base_path: PathBuf::from(DEFAULT_KB_PATH),
            history_window: DEFAULT_HISTORY_WINDOW,
            temperature: DEFAULT_TEMPERATURE,
            debug: false,
        }
    }
}

impl AgentConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model =
            std::env::var("AUTOSTREAM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let knowledge_base_path = std::env::var("AUTOSTREAM_KB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_KB_PATH));

        let debug = std::env::var("DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            knowledge_base_path,
            debug,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.history_window, 6);
        assert_eq!(config.knowledge_base_path, PathBuf::from("knowledge_base.json"));
        assert!(!config.debug);
    }
}
