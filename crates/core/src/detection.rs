//! Detection-result payload validation.
//!
//! The detection model pushes its output as a JSON object with a numeric
//! confidence plus a label naming the predicted condition. Only that shape
//! is checked; extra keys are stored untouched so newer model versions can
//! attach more data without a schema change.

use serde_json::Value;

use crate::error::CoreError;

/// Keys accepted for the predicted-condition label, in lookup order.
const LABEL_KEYS: &[&str] = &["detection", "label"];

/// A validated detection result, still carrying the raw payload for storage.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub confidence: f64,
    pub label: String,
    /// The full payload as received, persisted verbatim.
    pub raw: Value,
}

/// Parse and validate a detection-result JSON string.
pub fn parse(input: &str) -> Result<DetectionResult, CoreError> {
    let raw: Value = serde_json::from_str(input)
        .map_err(|e| CoreError::Validation(format!("Invalid detection result JSON: {e}")))?;
    let (confidence, label) = validate(&raw)?;
    Ok(DetectionResult {
        confidence,
        label,
        raw,
    })
}

/// Validate an already-parsed payload, returning `(confidence, label)`.
pub fn validate(raw: &Value) -> Result<(f64, String), CoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::Validation("Detection result must be a JSON object".into()))?;

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            CoreError::Validation("Detection result must contain a numeric 'confidence'".into())
        })?;

    let label = LABEL_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .ok_or_else(|| {
            CoreError::Validation(
                "Detection result must contain a 'detection' or 'label' string".into(),
            )
        })?;

    Ok((confidence, label.to_string()))
}
