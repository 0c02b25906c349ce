pub mod auditor;
pub mod batch;
pub mod gemini;
pub mod normalizer;
pub mod prompt;
pub mod request_builder;

pub use crate::domain::model::{AuditReport, AuditResponse, ErrorCode};
pub use crate::domain::ports::{ConfigProvider, ModelClient};
pub use crate::utils::error::Result;
