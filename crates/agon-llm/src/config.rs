//! Configuration management for Agon
//!
//! Provider selection and generation settings, read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::mock::MockProvider;
use crate::ollama::{OllamaProvider, DEFAULT_OLLAMA_URL};
use crate::provider::LlmProvider;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which backend generates argument text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mock,
    Ollama,
    Offline,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Ollama => "ollama",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "ollama" => Ok(Self::Ollama),
            "offline" | "none" => Ok(Self::Offline),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider (env: AGON_PROVIDER)
    pub provider: ProviderKind,
    /// Model name (env: AGON_MODEL)
    pub model: String,
    /// Ollama base URL (env: OLLAMA_URL)
    pub ollama_url: String,
    /// Per-call generation timeout in seconds (env: AGON_GENERATION_TIMEOUT_SECS)
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            model: "llama3".to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let provider = match lookup("AGON_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => defaults.provider,
        };
        let timeout_secs = match lookup("AGON_GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("AGON_GENERATION_TIMEOUT_SECS={}", raw))
            })?,
            None => defaults.timeout_secs,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generation timeout must be positive".to_string(),
            ));
        }

        Ok(Self {
            provider,
            model: lookup("AGON_MODEL").unwrap_or(defaults.model),
            ollama_url: lookup("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Instantiate the configured provider
    pub fn build_provider(&self) -> Arc<dyn LlmProvider> {
        match self.provider {
            ProviderKind::Mock => Arc::new(MockProvider::debater()),
            ProviderKind::Ollama => Arc::new(OllamaProvider::with_url(&self.ollama_url, &self.model)),
            ProviderKind::Offline => Arc::new(MockProvider::offline()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.model, "llama3");
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = LlmConfig::from_lookup(lookup(&[
            ("AGON_PROVIDER", "Mock"),
            ("AGON_MODEL", "mistral"),
            ("AGON_GENERATION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.provider, ProviderKind::Mock);
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.build_provider().name(), "debater-mock");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            LlmConfig::from_lookup(lookup(&[("AGON_PROVIDER", "gpt")])),
            Err(ConfigError::UnknownProvider(_))
        ));
        assert!(matches!(
            LlmConfig::from_lookup(lookup(&[("AGON_GENERATION_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LlmConfig::from_lookup(lookup(&[("AGON_GENERATION_TIMEOUT_SECS", "0")])),
            Err(ConfigError::Invalid(_))
        ));
    }
}
