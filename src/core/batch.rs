use crate::core::auditor::Auditor;
use crate::domain::model::AuditResponse;
use crate::domain::ports::ModelClient;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const BATCH_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub file: String,
    pub response: AuditResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub summary: BatchSummary,
    pub entries: Vec<BatchEntry>,
}

/// Photos directly inside `dir`, sorted by file name. A directory that does
/// not exist holds no photos.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_batch_extension(path))
        .collect();
    images.sort();
    Ok(images)
}

fn has_batch_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            BATCH_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Audits each image in turn. One image never affects another.
pub async fn run_batch<M: ModelClient>(auditor: &Auditor<M>, images: &[PathBuf]) -> BatchReport {
    let mut entries = Vec::with_capacity(images.len());
    let mut summary = BatchSummary {
        total: images.len(),
        ..Default::default()
    };

    for (i, path) in images.iter().enumerate() {
        tracing::debug!("Batch item {}/{}", i + 1, images.len());
        let response = auditor.audit_image(path).await;
        if response.is_completed() {
            summary.completed += 1;
        } else {
            summary.failed += 1;
        }
        entries.push(BatchEntry {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            response,
        });
    }

    BatchReport {
        generated_at: Utc::now(),
        model: auditor.client().model_name().to_string(),
        summary,
        entries,
    }
}

/// Human-readable block for one audited image.
pub fn render_entry(entry: &BatchEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--------------------------------------------------");
    let _ = writeln!(out, "📸 Auditing: {}", entry.file);

    match &entry.response {
        AuditResponse::Failed(failure) => {
            let _ = writeln!(out, "❌ Error: {}", failure.error);
            let _ = writeln!(out, "   Reason: {}", failure.reason);
        }
        AuditResponse::Completed(report) => {
            let audit = &report.audit_results;
            let _ = writeln!(out, "✅ Audit Successful");
            let _ = writeln!(out, "   Serial: {}", audit.indicator_serial);
            let _ = writeln!(out, "   Active: {}", audit.is_active);
            let _ = writeln!(out, "   Breach: {}", audit.breach_detected);
            if let Some(hours) = audit.max_exposure_hours {
                let _ = writeln!(out, "   Exposure: {} hours", hours);
            }
            let _ = writeln!(out, "   Verdict: {}", audit.safety_verdict);
            let _ = writeln!(
                out,
                "   Confidence: {}",
                report.confidence_metrics.ai_confidence_score
            );
            if let Ok(pretty) = serde_json::to_string_pretty(&entry.response) {
                let _ = writeln!(out, "{}", pretty);
            }
        }
    }
    out
}
