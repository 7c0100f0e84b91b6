//! Handler for looking up a patient from a photographed QR card.

use axum::extract::{Multipart, State};
use axum::Json;
use dermatrack_core::{patient_code, qr};
use dermatrack_db::models::patient::Patient;
use dermatrack_db::repositories::PatientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/patients/lookup/qr
///
/// Accepts a multipart form with a single `image` field containing a
/// photo or scan of the printed card. Decodes the business code and
/// returns the matching patient.
pub async fn lookup(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<Patient>> {
    let mut image_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            image_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            );
        }
    }

    let bytes =
        image_bytes.ok_or_else(|| AppError::BadRequest("Missing image field".to_string()))?;

    let code = qr::decode_bytes(&bytes)?;
    patient_code::validate(&code)?;

    let patient = PatientRepo::find_by_code(&state.pool, &code, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patient not found: {code}")))?;

    tracing::info!(code = %code, "QR lookup resolved");
    Ok(Json(patient))
}
