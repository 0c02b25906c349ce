use crate::domain::model::{AuditReport, AuditResponse, ErrorCode, EXPOSURE_MARKERS};
use crate::utils::error::{AuditError, Result};
use serde_json::Value;

const UNREADABLE_DEFAULT_REASON: &str = "Glare or blur on critical markers";

/// Turns raw model text into an [`AuditResponse`]. Never fails: anything that
/// cannot be read as a valid audit becomes `AUDIT_FAILED`.
pub fn normalize(raw: &str) -> AuditResponse {
    match parse_response(raw) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Model output rejected: {}", e);
            AuditResponse::failed(ErrorCode::AuditFailed, e.to_string())
        }
    }
}

pub fn parse_response(raw: &str) -> Result<AuditResponse> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;

    let obj = value
        .as_object()
        .ok_or_else(|| AuditError::schema("expected a JSON object"))?;

    let has_error = obj.contains_key("error");
    let has_audit = obj.contains_key("audit_results") || obj.contains_key("confidence_metrics");

    match (has_error, has_audit) {
        (true, true) => Err(AuditError::schema("response mixes error and audit fields")),
        (true, false) => model_reported_error(obj),
        (false, false) => Err(AuditError::schema("missing audit_results")),
        (false, true) => {
            let mut report: AuditReport = serde_json::from_value(value)?;
            validate_report(&mut report)?;
            Ok(AuditResponse::Completed(report))
        }
    }
}

fn model_reported_error(obj: &serde_json::Map<String, Value>) -> Result<AuditResponse> {
    let code = obj
        .get("error")
        .and_then(Value::as_str)
        .ok_or_else(|| AuditError::schema("error field must be a string"))?;
    let reason = obj.get("reason").and_then(Value::as_str);

    if code == ErrorCode::ImageUnreadable.as_str() {
        return Ok(AuditResponse::failed(
            ErrorCode::ImageUnreadable,
            reason.unwrap_or(UNREADABLE_DEFAULT_REASON),
        ));
    }

    Err(AuditError::schema(format!(
        "model reported error {}: {}",
        code,
        reason.unwrap_or("no reason given")
    )))
}

/// Checks the invariants the declared schema cannot express and applies the
/// round-up rule to the exposure time.
pub fn validate_report(report: &mut AuditReport) -> Result<()> {
    let score = report.confidence_metrics.ai_confidence_score;
    if !(0.0..=1.0).contains(&score) {
        return Err(AuditError::schema(format!(
            "ai_confidence_score {} outside [0, 1]",
            score
        )));
    }

    let results = &mut report.audit_results;
    match (results.breach_detected, results.max_exposure_hours) {
        (true, None) => Err(AuditError::schema(
            "breach_detected is true but max_exposure_hours is missing",
        )),
        (false, Some(hours)) => Err(AuditError::schema(format!(
            "max_exposure_hours {} reported without a breach",
            hours
        ))),
        (false, None) => Ok(()),
        (true, Some(hours)) => {
            let marker = round_up_to_marker(hours).ok_or_else(|| {
                AuditError::schema(format!(
                    "max_exposure_hours {} is outside the printed markers",
                    hours
                ))
            })?;
            if marker != hours {
                tracing::info!("Rounded exposure {}h up to marker {}h", hours, marker);
            }
            results.max_exposure_hours = Some(marker);
            Ok(())
        }
    }
}

/// Smallest printed marker at or above `hours`. A breach whose dye front has
/// not yet reached the first marker still counts as the first marker.
pub fn round_up_to_marker(hours: f64) -> Option<f64> {
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    EXPOSURE_MARKERS.iter().copied().find(|m| hours <= *m)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // language tag, e.g. `json` or `JSON`
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SafetyVerdict;
    use serde_json::json;

    fn success_json(breach: bool, hours: Value) -> String {
        let verdict = if breach { "DISCARD" } else { "SAFE" };
        json!({
            "audit_results": {
                "indicator_serial": "SN 7731-0042",
                "temp_threshold": "8°C",
                "is_active": true,
                "breach_detected": breach,
                "max_exposure_hours": hours,
                "safety_verdict": verdict
            },
            "confidence_metrics": {
                "ai_confidence_score": 0.87,
                "glare_detected": false
            }
        })
        .to_string()
    }

    fn reason_of(response: &AuditResponse) -> &str {
        match response {
            AuditResponse::Failed(f) => &f.reason,
            AuditResponse::Completed(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_passes_through_valid_report() {
        let response = normalize(&success_json(false, Value::Null));
        let report = response.report().unwrap();
        assert_eq!(report.audit_results.indicator_serial, "SN 7731-0042");
        assert_eq!(report.audit_results.safety_verdict, SafetyVerdict::Safe);
        assert_eq!(report.audit_results.max_exposure_hours, None);
    }

    #[test]
    fn test_exposure_rounds_up_to_next_marker() {
        let response = normalize(&success_json(true, json!(1.4)));
        let report = response.report().unwrap();
        assert_eq!(report.audit_results.max_exposure_hours, Some(2.0));

        let response = normalize(&success_json(true, json!(0.5)));
        assert_eq!(
            response.report().unwrap().audit_results.max_exposure_hours,
            Some(0.5)
        );
    }

    #[test]
    fn test_round_up_to_marker() {
        assert_eq!(round_up_to_marker(0.1), Some(0.5));
        assert_eq!(round_up_to_marker(4.0), Some(4.0));
        assert_eq!(round_up_to_marker(4.01), Some(8.0));
        assert_eq!(round_up_to_marker(9.0), None);
        assert_eq!(round_up_to_marker(0.0), Some(0.5));
        assert_eq!(round_up_to_marker(-1.0), None);
        assert_eq!(round_up_to_marker(f64::NAN), None);
    }

    #[test]
    fn test_breach_below_first_marker_reports_first_marker() {
        let response = normalize(&success_json(true, json!(0)));
        let report = response.report().expect("zero-hour breach is a valid audit");
        assert_eq!(report.audit_results.max_exposure_hours, Some(0.5));
        assert_eq!(report.audit_results.safety_verdict, SafetyVerdict::Discard);
    }

    #[test]
    fn test_negative_exposure_fails() {
        let response = normalize(&success_json(true, json!(-0.5)));
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert!(reason_of(&response).contains("outside the printed markers"));
    }

    #[test]
    fn test_breach_without_hours_fails() {
        let response = normalize(&success_json(true, Value::Null));
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert!(reason_of(&response).contains("max_exposure_hours is missing"));
    }

    #[test]
    fn test_hours_without_breach_fails() {
        let response = normalize(&success_json(false, json!(2)));
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
    }

    #[test]
    fn test_malformed_json() {
        let raw = "The strip looks fine to me";
        let response = normalize(raw);
        let expected = serde_json::from_str::<Value>(raw).unwrap_err().to_string();

        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert_eq!(reason_of(&response), expected);
    }

    #[test]
    fn test_image_unreadable_passthrough() {
        let response =
            normalize(r#"{"error": "IMAGE_UNREADABLE", "reason": "Glare or blur on critical markers"}"#);
        assert_eq!(
            response.to_json(),
            r#"{"error":"IMAGE_UNREADABLE","reason":"Glare or blur on critical markers"}"#
        );
    }

    #[test]
    fn test_unknown_model_error_is_audit_failed() {
        let response = normalize(r#"{"error": "TOO_DARK", "reason": "underexposed"}"#);
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
        assert!(reason_of(&response).contains("TOO_DARK"));
    }

    #[test]
    fn test_mixed_shape_rejected() {
        let mut value: Value = serde_json::from_str(&success_json(false, Value::Null)).unwrap();
        value["error"] = json!("IMAGE_UNREADABLE");

        let response = normalize(&value.to_string());
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
    }

    #[test]
    fn test_null_boolean_rejected() {
        let mut value: Value = serde_json::from_str(&success_json(false, Value::Null)).unwrap();
        value["audit_results"]["is_active"] = Value::Null;

        let response = normalize(&value.to_string());
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
    }

    #[test]
    fn test_unknown_verdict_rejected() {
        let mut value: Value = serde_json::from_str(&success_json(false, Value::Null)).unwrap();
        value["audit_results"]["safety_verdict"] = json!("PROBABLY_FINE");

        let response = normalize(&value.to_string());
        assert_eq!(response.error_code(), Some(ErrorCode::AuditFailed));
    }

    #[test]
    fn test_confidence_out_of_range() {
        let mut value: Value = serde_json::from_str(&success_json(false, Value::Null)).unwrap();
        value["confidence_metrics"]["ai_confidence_score"] = json!(87);

        let response = normalize(&value.to_string());
        assert!(reason_of(&response).contains("outside [0, 1]"));
    }

    #[test]
    fn test_code_fence_stripped() {
        let raw = format!("```json\n{}\n```", success_json(false, Value::Null));
        assert!(normalize(&raw).is_completed());
    }

    #[test]
    fn test_uppercase_fence_tag_stripped() {
        let raw = format!("```JSON\n{}\n```", success_json(true, json!(3)));
        let response = normalize(&raw);
        assert_eq!(
            response.report().expect("fenced audit").audit_results.max_exposure_hours,
            Some(4.0)
        );

        let raw = format!("```Json {}```", success_json(false, Value::Null));
        assert!(normalize(&raw).is_completed());
    }

    #[test]
    fn test_non_object_rejected() {
        let response = normalize("[1, 2, 3]");
        assert!(reason_of(&response).contains("expected a JSON object"));
    }
}
