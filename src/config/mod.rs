#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use std::fmt;
use toml_config::TomlConfig;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Credential for the model service. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        write!(f, "ApiKey(***{})", tail)
    }
}

/// Values given explicitly by the caller; each wins over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl AuditConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }

    /// Resolves settings in order: explicit overrides, settings file, then
    /// `env` (the process environment in production).
    pub fn resolve<F>(overrides: ConfigOverrides, file: Option<&TomlConfig>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |s: &String| !s.trim().is_empty();

        let api_key = overrides
            .api_key
            .filter(non_empty)
            .or_else(|| file.and_then(|f| f.api_key()).map(str::to_string))
            .or_else(|| env(API_KEY_ENV).filter(non_empty))
            .ok_or(AuditError::MissingCredential)?;

        let model = overrides
            .model
            .or_else(|| file.and_then(|f| f.model.name.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = overrides
            .endpoint
            .or_else(|| file.and_then(|f| f.model.endpoint.clone()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| file.and_then(|f| f.model.timeout_seconds));

        let config = Self {
            api_key: ApiKey::new(api_key),
            model,
            endpoint,
            timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolves against the real process environment.
    pub fn from_env(overrides: ConfigOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        Self::resolve(overrides, file, |name| std::env::var(name).ok())
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_key", self.api_key.expose())?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_url("endpoint", &self.endpoint)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for AuditConfig {
    fn api_key(&self) -> &str {
        self.api_key.expose()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}
