use crate::core::prompt::INSPECTION_PROCEDURE;
use crate::domain::request::{sniff_mime_type, InlineImage, InspectionRequest};
use crate::utils::error::{AuditError, Result};
use base64::{prelude::BASE64_STANDARD, Engine};
use std::path::Path;

/// Loads the image at `path` and pairs it with the inspection procedure.
/// The MIME type comes from the file content, so nothing that is not a
/// supported image ever reaches the model.
pub async fn build_request(path: &Path) -> Result<InspectionRequest> {
    if !path.is_file() {
        return Err(AuditError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let mime_type = sniff_mime_type(&bytes).ok_or_else(|| AuditError::UnsupportedImageFormat {
        path: path.display().to_string(),
    })?;
    tracing::debug!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime_type
    );

    Ok(InspectionRequest {
        instruction: INSPECTION_PROCEDURE,
        image: InlineImage {
            mime_type,
            data: BASE64_STANDARD.encode(&bytes),
        },
    })
}
