//! Handlers for detection sessions: operator-side creation, review
//! updates, image appends, and deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use dermatrack_core::detection;
use dermatrack_core::error::CoreError;
use dermatrack_core::types::DbId;
use dermatrack_db::models::detection_session::{
    CreateDetectionSession, SessionWithImages, UpdateDetectionSession,
};
use dermatrack_db::repositories::{DetectionSessionRepo, PatientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::{collect_session_upload, store_patient_images};

/// POST /api/v1/patients/{id}/sessions
///
/// Accepts a multipart form with repeated `images` file fields and
/// optional `detection_result` (JSON text), `diagnostic_result`, and
/// `follow_up_plan` text fields. Writes the images to disk, then records
/// the session and its image rows in one transaction.
pub async fn create_for_patient(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(patient_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<SessionWithImages>)> {
    let patient = PatientRepo::find_by_id(&state.pool, patient_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id: patient_id,
        }))?;

    let upload = collect_session_upload(&mut multipart)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let detection_result = match upload.detection_result.as_deref() {
        Some(text) => Some(detection::parse(text)?.raw),
        None => None,
    };

    let paths = store_patient_images(&state.config.image_store(), patient.id, &upload.images).await?;

    let created = DetectionSessionRepo::create_with_images(
        &state.pool,
        &CreateDetectionSession {
            patient_id: patient.id,
            user_id: auth_user.user_id,
            detection_result,
            diagnostic_result: upload.diagnostic_result,
            follow_up_plan: upload.follow_up_plan,
        },
        &paths,
    )
    .await?;

    tracing::info!(
        session_id = created.session.id,
        patient = %patient.code,
        images = created.images.len(),
        "Detection session created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/sessions/{id}
///
/// Partial JSON update of the review fields. A provided
/// `detection_result` must carry the detection payload shape.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDetectionSession>,
) -> AppResult<Json<SessionWithImages>> {
    if let Some(raw) = &input.detection_result {
        detection::validate(raw)?;
    }

    let updated = DetectionSessionRepo::update_with_images(&state.pool, id, auth_user.user_id, &input, &[])
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Detection session",
            id,
        }))?;
    Ok(Json(updated))
}

/// POST /api/v1/sessions/{id}/images
///
/// Appends photos to an existing session. Accepts the same repeated
/// `images` multipart fields as session creation.
pub async fn append_images(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<SessionWithImages>> {
    let session = DetectionSessionRepo::find_by_id(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Detection session",
            id,
        }))?;

    let upload = collect_session_upload(&mut multipart)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if upload.images.is_empty() {
        return Err(AppError::BadRequest(
            "No files received in multipart upload".to_string(),
        ));
    }

    let paths =
        store_patient_images(&state.config.image_store(), session.patient_id, &upload.images)
            .await?;

    let updated = DetectionSessionRepo::update_with_images(
        &state.pool,
        id,
        auth_user.user_id,
        &UpdateDetectionSession::default(),
        &paths,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Detection session",
        id,
    }))?;

    tracing::info!(session_id = id, appended = paths.len(), "Images appended");
    Ok(Json(updated))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DetectionSessionRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Detection session",
            id,
        }))
    }
}
