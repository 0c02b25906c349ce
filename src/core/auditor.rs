use crate::core::normalizer::normalize;
use crate::core::request_builder::build_request;
use crate::domain::model::{AuditResponse, ErrorCode};
use crate::domain::ports::ModelClient;
use std::path::Path;

/// Runs one audit per call: load image, ask the model, normalize the answer.
pub struct Auditor<M: ModelClient> {
    client: M,
}

impl<M: ModelClient> Auditor<M> {
    pub fn new(client: M) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &M {
        &self.client
    }

    /// Every failure is folded into the returned response; nothing is raised.
    pub async fn audit_image(&self, path: impl AsRef<Path>) -> AuditResponse {
        let path = path.as_ref();
        tracing::info!("Auditing {} with {}", path.display(), self.client.model_name());

        let request = match build_request(path).await {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Request not built: {}", e);
                return e.into();
            }
        };

        let raw = match self.client.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    "Model call failed: {} (Severity: {:?}). {}",
                    e,
                    e.severity(),
                    e.recovery_suggestion()
                );
                return AuditResponse::failed(ErrorCode::AuditFailed, e.to_string());
            }
        };
        tracing::debug!("Raw model output: {}", raw);

        let response = normalize(&raw);
        match &response {
            AuditResponse::Completed(report) => tracing::info!(
                "✅ {} -> {}",
                report.audit_results.indicator_serial,
                report.audit_results.safety_verdict
            ),
            AuditResponse::Failed(failure) => {
                tracing::warn!("❌ {}: {}", failure.error, failure.reason)
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::InspectionRequest;
    use crate::utils::error::{AuditError, Result};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{Builder, NamedTempFile};

    struct MockModel {
        reply: std::result::Result<String, u16>,
        calls: AtomicUsize,
    }

    impl MockModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelClient for MockModel {
        async fn generate(&self, _request: &InspectionRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(AuditError::ServiceError {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }

        async fn ping(&self, _prompt: &str) -> Result<String> {
            Ok("pong".to_string())
        }

        fn model_name(&self) -> &str {
            "mock-vision"
        }
    }

    fn jpeg_fixture() -> NamedTempFile {
        let mut file = Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        file
    }

    const SAFE_REPLY: &str = r#"{
        "audit_results": {
            "indicator_serial": "A1B2C3",
            "temp_threshold": "25°C",
            "is_active": false,
            "breach_detected": false,
            "max_exposure_hours": null,
            "safety_verdict": "SAFE"
        },
        "confidence_metrics": {"ai_confidence_score": 0.95, "glare_detected": false}
    }"#;

    #[tokio::test]
    async fn test_missing_file_skips_model() {
        let auditor = Auditor::new(MockModel::replying(SAFE_REPLY));
        let response = auditor.audit_image("/definitely/missing.jpg").await;

        assert_eq!(
            response.to_json(),
            r#"{"error":"FILE_NOT_FOUND","reason":"Image not found at /definitely/missing.jpg"}"#
        );
        assert_eq!(auditor.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_audit() {
        let image = jpeg_fixture();
        let auditor = Auditor::new(MockModel::replying(SAFE_REPLY));

        let response = auditor.audit_image(image.path()).await;
        let report = response.report().expect("completed audit");
        assert_eq!(report.audit_results.indicator_serial, "A1B2C3");
        assert!(!report.audit_results.is_active);
        assert_eq!(auditor.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_failure_is_audit_failed() {
        let image = jpeg_fixture();
        let auditor = Auditor::new(MockModel::failing(429));

        let response = auditor.audit_image(image.path()).await;
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert!(response.to_json().contains("429"));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_audit_failed() {
        let file = Builder::new().suffix(".bmp").tempfile().unwrap();
        let auditor = Auditor::new(MockModel::replying(SAFE_REPLY));

        let response = auditor.audit_image(file.path()).await;
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert_eq!(auditor.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_audits_are_identical() {
        let image = jpeg_fixture();
        let auditor = Auditor::new(MockModel::replying(SAFE_REPLY));

        let first = auditor.audit_image(image.path()).await;
        let second = auditor.audit_image(image.path()).await;
        assert_eq!(first, second);
    }
}
