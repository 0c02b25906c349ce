#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

pub const TEST_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "test-model";

pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
pub const WEBP_BYTES: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";

pub fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", TEST_MODEL)
}

/// Wraps model text the way the service does.
pub fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

pub fn breached_audit_text() -> String {
    json!({
        "audit_results": {
            "indicator_serial": "TS+ 0093-1177",
            "temp_threshold": "10°C",
            "is_active": true,
            "breach_detected": true,
            "max_exposure_hours": 4,
            "safety_verdict": "DISCARD"
        },
        "confidence_metrics": {
            "ai_confidence_score": 0.82,
            "glare_detected": true
        }
    })
    .to_string()
}

pub fn fixture(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

pub fn jpeg_fixture() -> NamedTempFile {
    fixture(".jpg", JPEG_BYTES)
}
