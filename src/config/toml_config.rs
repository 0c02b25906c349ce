use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file, e.g. `pharmaguard.toml`:
///
/// ```toml
/// [model]
/// name = "gemini-pro-latest"
/// endpoint = "https://generativelanguage.googleapis.com"
/// timeout_seconds = 60
///
/// [credentials]
/// api_key = "${GOOGLE_API_KEY}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub credentials: CredentialsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub api_key: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a settings file after `${VAR}` substitution.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AuditError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content, |name| std::env::var(name).ok());

        toml::from_str(&processed).map_err(|e| AuditError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// API key from the file, ignoring placeholders left unresolved.
    pub fn api_key(&self) -> Option<&str> {
        self.credentials
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty() && !is_placeholder(k))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.model.endpoint {
            validation::validate_url("model.endpoint", endpoint)?;
        }
        if let Some(name) = &self.model.name {
            validation::validate_non_empty_string("model.name", name)?;
        }
        if let Some(timeout) = self.model.timeout_seconds {
            validation::validate_positive_number("model.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

fn placeholder_regex() -> Regex {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
}

fn is_placeholder(value: &str) -> bool {
    placeholder_regex().is_match(value)
}

/// Replaces `${VAR}` placeholders such as `${GOOGLE_API_KEY}`; unknown
/// variables are left as written.
fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    placeholder_regex()
        .replace_all(content, |caps: &regex::Captures| {
            let name = &caps[1];
            lookup(name).unwrap_or_else(|| format!("${{{}}}", name))
        })
        .into_owned()
}
