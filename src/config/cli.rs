use crate::config::{toml_config::TomlConfig, AuditConfig, ConfigOverrides};
use crate::domain::model::{AuditResponse, ErrorCode};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pharmaguard-audit")]
#[command(about = "Audit a photo of a temperature indicator strip and print a JSON verdict")]
pub struct CliConfig {
    /// Path to the image file to audit
    pub image_path: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Exit non-zero when the audit does not complete
    #[arg(long)]
    pub strict_exit: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Shape of the log lines written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Model and credential flags shared by every binary.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ModelArgs {
    /// API key (defaults to GOOGLE_API_KEY)
    #[arg(long = "api-key", alias = "api_key")]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the model service
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout; unset waits indefinitely
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl ModelArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// Loads the settings file if given and resolves against the environment.
    pub fn resolve(&self) -> Result<AuditConfig> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        AuditConfig::from_env(self.overrides(), file.as_ref())
    }
}

/// Process exit code for a printed response.
pub fn exit_code(response: &AuditResponse, strict: bool) -> i32 {
    if !strict {
        return 0;
    }
    match response.error_code() {
        None => 0,
        Some(ErrorCode::CliExecutionFailed) => 2,
        Some(_) => 1,
    }
}
