//! AI configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Gemini's OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Default upper bound on a single AI request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which AI backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Canned local responses; no credential or network needed.
    Fake,
}

impl ProviderKind {
    /// Read `FLAVOR_AI_PROVIDER`, defaulting to Gemini.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup("FLAVOR_AI_PROVIDER") {
            None => Ok(Self::default()),
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "FLAVOR_AI_PROVIDER".to_string(),
                value,
            }),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "fake" => Ok(Self::Fake),
            _ => Err(()),
        }
    }
}

/// AI client configuration.
#[derive(Clone)]
pub struct AiConfig {
    /// API key for the Gemini API.
    pub api_key: String,
    /// Model name (e.g., "gemini-2.0-flash-001").
    pub model: String,
    /// Base URL for the OpenAI-compatible API.
    pub base_url: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GOOGLE_API_KEY` (or `GEMINI_API_KEY`): API key for Gemini
    ///
    /// Optional:
    /// - `FLAVOR_AI_MODEL`: Model name (default: "gemini-2.0-flash-001")
    /// - `FLAVOR_AI_BASE_URL`: API base URL (default: Gemini's OpenAI-compatible endpoint)
    /// - `FLAVOR_AI_TIMEOUT_SECS`: Request timeout in seconds (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = API_KEY_VARS
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VARS[0].to_string()))?;

        let model = lookup("FLAVOR_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url =
            lookup("FLAVOR_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("FLAVOR_AI_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "FLAVOR_AI_TIMEOUT_SECS".to_string(),
                value,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = AiConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "GOOGLE_API_KEY"));
    }

    #[test]
    fn test_gemini_key_fallback() {
        let config = AiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "other")])).unwrap();
        assert_eq!(config.api_key, "other");
    }

    #[test]
    fn test_overrides() {
        let config = AiConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "secret"),
            ("FLAVOR_AI_MODEL", "gemini-2.5-flash"),
            ("FLAVOR_AI_BASE_URL", "http://localhost:9999/v1"),
            ("FLAVOR_AI_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "http://localhost:9999/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = AiConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "secret"),
            ("FLAVOR_AI_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "secret")])).unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_provider_kind() {
        assert_eq!(ProviderKind::from_lookup(lookup(&[])).unwrap(), ProviderKind::Gemini);
        assert_eq!(
            ProviderKind::from_lookup(lookup(&[("FLAVOR_AI_PROVIDER", "Fake")])).unwrap(),
            ProviderKind::Fake
        );
        assert!(ProviderKind::from_lookup(lookup(&[("FLAVOR_AI_PROVIDER", "openai")])).is_err());
    }
}
