//! Handler for the unauthenticated device push endpoint.
//!
//! The capture device firmware treats any non-200 response as a transport
//! failure and retries, so this endpoint always answers HTTP 200 and
//! signals the outcome in the body: `{"session_id": ...}` on success,
//! `{"error": "..."}` otherwise. Rejected pushes are logged since the
//! device operator never sees the message.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use dermatrack_core::detection;
use dermatrack_core::types::DbId;
use dermatrack_db::models::detection_session::CreateDetectionSession;
use dermatrack_db::repositories::{DetectionSessionRepo, PatientRepo};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::uploads::{collect_session_upload, store_patient_images};

/// POST /api/detection/{patient_code}
///
/// Accepts a multipart form with repeated `images` file fields and a
/// `detection_result` JSON text field. The session is recorded under the
/// operator account.
pub async fn push(
    State(state): State<AppState>,
    Path(patient_code): Path<String>,
    multipart: Multipart,
) -> Json<Value> {
    match handle_push(&state, &patient_code, multipart).await {
        Ok(session_id) => Json(json!({
            "message": "Detection session created",
            "session_id": session_id,
        })),
        Err(message) => {
            tracing::warn!(code = %patient_code, error = %message, "Device push rejected");
            Json(json!({ "error": message }))
        }
    }
}

/// The fallible body of [`push`]. Every failure becomes the `error`
/// string of the 200 response.
async fn handle_push(
    state: &AppState,
    patient_code: &str,
    mut multipart: Multipart,
) -> Result<DbId, String> {
    let patient = PatientRepo::find_by_code(&state.pool, patient_code, state.operator_id)
        .await
        .map_err(|e| format!("Database error: {e}"))?
        .ok_or_else(|| "Patient not found".to_string())?;

    let upload = collect_session_upload(&mut multipart)
        .await
        .map_err(|e| format!("Invalid multipart request: {e}"))?;

    if upload.images.is_empty() {
        return Err("No images provided".to_string());
    }
    let result_text = upload
        .detection_result
        .as_deref()
        .ok_or_else(|| "Missing detection_result field".to_string())?;
    let parsed = detection::parse(result_text).map_err(|e| e.to_string())?;

    let paths = store_patient_images(&state.config.image_store(), patient.id, &upload.images)
        .await
        .map_err(|e| e.to_string())?;

    let created = DetectionSessionRepo::create_with_images(
        &state.pool,
        &CreateDetectionSession {
            patient_id: patient.id,
            user_id: state.operator_id,
            detection_result: Some(parsed.raw),
            diagnostic_result: None,
            follow_up_plan: None,
        },
        &paths,
    )
    .await
    .map_err(|e| format!("Database error: {e}"))?;

    tracing::info!(
        session_id = created.session.id,
        patient = %patient.code,
        images = created.images.len(),
        "Device push stored"
    );
    Ok(created.session.id)
}
