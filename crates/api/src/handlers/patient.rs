//! Handlers for the `/patients` resource.
//!
//! Patients are addressed two ways: the operator UI navigates by the
//! printed business code (`P-YYYYMMDD-NNN`), while edits and deletes use
//! the numeric internal ID.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use dermatrack_core::error::CoreError;
use dermatrack_core::storage::ImageStore;
use dermatrack_core::types::DbId;
use dermatrack_core::{patient_code, qr, validation};
use dermatrack_db::models::patient::{
    CreatePatient, Patient, PatientFullDetails, UpdatePatient,
};
use dermatrack_db::repositories::PatientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/patients
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Patient>>> {
    let patients = PatientRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(patients))
}

/// POST /api/v1/patients
///
/// Generates the business code server-side and renders the QR card. A
/// failed QR render is logged but does not fail the registration; the
/// card can be regenerated from the stored code at any time.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePatient>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    validate_new_patient(&input)?;

    let code = patient_code::generate(Utc::now().date_naive());
    let patient = PatientRepo::create(&state.pool, auth_user.user_id, &code, &input).await?;

    write_qr_card(&state.config.image_store(), &patient.code).await;

    tracing::info!(code = %patient.code, "Patient registered");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// GET /api/v1/patients/{id}
///
/// `{id}` here is the patient business code. Returns the patient with
/// every detection session and its images.
pub async fn get_by_code(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(code): Path<String>,
) -> AppResult<Json<PatientFullDetails>> {
    let details = PatientRepo::full_details(&state.pool, &code, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patient not found: {code}")))?;
    Ok(Json(details))
}

/// PUT /api/v1/patients/{id}
///
/// Returns the refreshed full details so the record view can redraw
/// without a second request.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePatient>,
) -> AppResult<Json<PatientFullDetails>> {
    validate_patient_changes(&input)?;

    let patient = PatientRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;

    let details = PatientRepo::full_details(&state.pool, &patient.code, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;
    Ok(Json(details))
}

/// DELETE /api/v1/patients/{id}
///
/// Sessions and image rows go with the patient by cascade. Files on disk
/// are left behind for offline retention.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PatientRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_new_patient(input: &CreatePatient) -> Result<(), CoreError> {
    validation::require("name", &input.name)?;
    validation::validate_sex(&input.sex)?;
    validation::validate_phone(&input.phone)?;
    Ok(())
}

fn validate_patient_changes(input: &UpdatePatient) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validation::require("name", name)?;
    }
    if let Some(sex) = &input.sex {
        validation::validate_sex(sex)?;
    }
    if let Some(phone) = &input.phone {
        validation::validate_phone(phone)?;
    }
    Ok(())
}

/// Render the QR card PNG for a business code and write it under the
/// store's QR directory. Failures are logged, never propagated.
async fn write_qr_card(store: &ImageStore, code: &str) {
    let png = match qr::render_png(code) {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!(code = %code, error = %e, "QR card render failed");
            return;
        }
    };

    let dest = store.qr_path(code);
    if let Err(e) = tokio::fs::write(&dest, &png).await {
        tracing::warn!(code = %code, path = %dest.display(), error = %e, "QR card write failed");
    }
}
