use serde::{Deserialize, Serialize};
use std::fmt;

/// Time markers printed under the breach window, in hours.
pub const EXPOSURE_MARKERS: [f64; 5] = [0.5, 1.0, 2.0, 4.0, 8.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyVerdict {
    Safe,
    Caution,
    Discard,
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafetyVerdict::Safe => "SAFE",
            SafetyVerdict::Caution => "CAUTION",
            SafetyVerdict::Discard => "DISCARD",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResults {
    pub indicator_serial: String,
    pub temp_threshold: String,
    pub is_active: bool,
    pub breach_detected: bool,
    #[serde(default)]
    pub max_exposure_hours: Option<f64>,
    pub safety_verdict: SafetyVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    pub ai_confidence_score: f64,
    pub glare_detected: bool,
}

/// Success shape of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_results: AuditResults,
    pub confidence_metrics: ConfidenceMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    FileNotFound,
    ImageUnreadable,
    AuditFailed,
    CliExecutionFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::ImageUnreadable => "IMAGE_UNREADABLE",
            ErrorCode::AuditFailed => "AUDIT_FAILED",
            ErrorCode::CliExecutionFailed => "CLI_EXECUTION_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure shape of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFailure {
    pub error: ErrorCode,
    pub reason: String,
}

impl AuditFailure {
    pub fn new(error: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            error,
            reason: reason.into(),
        }
    }
}

/// Outcome of one audit. Serializes to either
/// `{"audit_results": .., "confidence_metrics": ..}` or `{"error": .., "reason": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditResponse {
    Completed(AuditReport),
    Failed(AuditFailure),
}

impl AuditResponse {
    pub fn failed(error: ErrorCode, reason: impl Into<String>) -> Self {
        AuditResponse::Failed(AuditFailure::new(error, reason))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AuditResponse::Completed(_))
    }

    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            AuditResponse::Completed(report) => Some(report),
            AuditResponse::Failed(_) => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            AuditResponse::Completed(_) => None,
            AuditResponse::Failed(failure) => Some(failure.error),
        }
    }

    pub fn to_json(&self) -> String {
        // both variants hold only strings, booleans and finite floats
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"error":"AUDIT_FAILED","reason":{}}}"#,
                serde_json::Value::String(e.to_string())
            )
        })
    }
}

impl From<crate::utils::error::AuditError> for AuditResponse {
    fn from(err: crate::utils::error::AuditError) -> Self {
        AuditResponse::failed(err.error_code(), err.to_string())
    }
}
