use crate::domain::model::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Image not found at {path}")]
    FileNotFound { path: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API Key is required. Set GOOGLE_API_KEY environment variable or pass it with --api-key.")]
    MissingCredential,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model service returned {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Model returned no content{}", block_suffix(.block_reason))]
    EmptyResponse { block_reason: Option<String> },

    #[error("Unsupported image format: {path} is not a JPEG, PNG, WEBP, HEIC or GIF image")]
    UnsupportedImageFormat { path: String },

    #[error("Response violates audit schema: {message}")]
    SchemaViolation { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Outcome of the input, not a fault in the tool
    Low,
    High,
    Critical,
}

impl AuditError {
    pub fn schema(message: impl Into<String>) -> Self {
        AuditError::SchemaViolation {
            message: message.into(),
        }
    }

    /// Code reported in the JSON payload when this error reaches the output boundary.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AuditError::FileNotFound { .. } => ErrorCode::FileNotFound,
            AuditError::MissingCredential
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. } => ErrorCode::CliExecutionFailed,
            _ => ErrorCode::AuditFailed,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuditError::FileNotFound { .. } | AuditError::UnsupportedImageFormat { .. } => {
                ErrorSeverity::Low
            }
            AuditError::MissingCredential
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::FileNotFound { .. } => "Check the image path and try again",
            AuditError::ApiError(_) => "Check network connectivity to the model endpoint",
            AuditError::MissingCredential => {
                "Export GOOGLE_API_KEY, add it to .env, or pass --api-key"
            }
            AuditError::ConfigError { .. } | AuditError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            AuditError::ServiceError { status, .. } if *status == 429 => {
                "Quota exhausted; wait and retry or use another key"
            }
            AuditError::ServiceError { .. } => "Verify the model name and API key",
            AuditError::UnsupportedImageFormat { .. } => "Use a JPEG, PNG, WEBP, HEIC or GIF photo",
            AuditError::EmptyResponse { .. } | AuditError::SchemaViolation { .. } => {
                "Retake the photo with even lighting and audit again"
            }
            AuditError::IoError(_) | AuditError::SerializationError(_) => {
                "Run again with --verbose for details"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

fn block_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(" (blocked: {r})"))
        .unwrap_or_default()
}
