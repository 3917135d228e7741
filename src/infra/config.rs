//! Process configuration from the environment (and an optional `.env` file).

use std::path::PathBuf;

use secrecy::SecretBox;
use thiserror::Error;

use super::constants::{API_KEY_VAR, APP_DIR_NAME, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Which backend adapter to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    /// Scripted offline backend, useful for demos and UI work without a key
    Mock,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set; export it or add it to a .env file")]
    MissingApiKey { var: &'static str },

    #[error("unknown provider '{value}' (expected 'openrouter' or 'mock')")]
    UnknownProvider { value: String },

    #[error("cannot determine the home directory; set L2_HOME")]
    NoHomeDir,
}

#[derive(Debug)]
pub struct Config {
    pub provider: Provider,
    pub api_key: Option<SecretBox<String>>,
    pub model: String,
    pub base_url: String,
    /// Per-user application directory all records live under
    pub home: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = match get("L2_PROVIDER").as_deref() {
            None | Some("openrouter") => Provider::OpenRouter,
            Some("mock") => Provider::Mock,
            Some(other) => return Err(ConfigError::UnknownProvider { value: other.to_string() }),
        };

        let api_key = get(API_KEY_VAR).map(|k| SecretBox::new(Box::new(k)));
        if provider == Provider::OpenRouter && api_key.is_none() {
            return Err(ConfigError::MissingApiKey { var: API_KEY_VAR });
        }

        let home = match get("L2_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir().map(|h| h.join(APP_DIR_NAME)).ok_or(ConfigError::NoHomeDir)?,
        };

        Ok(Self {
            provider,
            api_key,
            model: get("L2_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("L2_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            home,
            log_filter: get("L2_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_key() {
        let config = Config::from_lookup(lookup(&[("OPENROUTER", "sk-test"), ("L2_HOME", "/tmp/l2-test")])).unwrap();
        assert_eq!(config.provider, Provider::OpenRouter);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.home, PathBuf::from("/tmp/l2-test"));
        assert_eq!(config.logs_dir(), PathBuf::from("/tmp/l2-test/logs"));
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.api_key.unwrap().expose_secret(), "sk-test");
    }

    #[test]
    fn missing_key_is_fatal_for_openrouter() {
        let err = Config::from_lookup(lookup(&[("OPENROUTER", "  "), ("L2_HOME", "/tmp/x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { var: "OPENROUTER" }));
    }

    #[test]
    fn mock_provider_needs_no_key() {
        let config = Config::from_lookup(lookup(&[("L2_PROVIDER", "mock"), ("L2_HOME", "/tmp/x")])).unwrap();
        assert_eq!(config.provider, Provider::Mock);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("OPENROUTER", "k"),
            ("L2_HOME", "/tmp/x"),
            ("L2_MODEL", "anthropic/claude-sonnet-4"),
            ("L2_BASE_URL", "http://localhost:8080/v1/"),
            ("L2_LOG", "l2=debug"),
        ]))
        .unwrap();
        assert_eq!(config.model, "anthropic/claude-sonnet-4");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.log_filter, "l2=debug");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = Config::from_lookup(lookup(&[("L2_PROVIDER", "carrier-pigeon")])).unwrap_err();
        assert_eq!(err.to_string(), "unknown provider 'carrier-pigeon' (expected 'openrouter' or 'mock')");
    }
}
