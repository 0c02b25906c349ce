pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, ModelArgs};
pub use crate::config::{AuditConfig, ConfigOverrides};

pub use crate::core::{auditor::Auditor, gemini::GeminiClient};
pub use crate::domain::model::{AuditReport, AuditResponse, ErrorCode, SafetyVerdict};
pub use crate::utils::error::{AuditError, Result};
