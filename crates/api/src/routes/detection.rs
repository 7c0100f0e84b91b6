//! Route definitions for the device push endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::detection_push;
use crate::state::AppState;

/// Routes mounted at `/api/detection` (root level, not under `/api/v1`).
///
/// ```text
/// POST /{patient_code}  -> push a detection session (multipart, always 200)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{patient_code}", post(detection_push::push))
}
