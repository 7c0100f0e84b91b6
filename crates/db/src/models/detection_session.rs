//! Detection session entity model and DTOs.

use dermatrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::models::detection_image::DetectionImage;

/// A row from the `detection_sessions` table.
///
/// `detection_result` holds the raw model output as JSON. The clinic
/// fields (`diagnostic_result`, `follow_up_plan`) start empty and are
/// filled in by the operator after review.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetectionSession {
    pub id: DbId,
    pub patient_id: DbId,
    pub user_id: DbId,
    pub detection_result: Option<Value>,
    pub diagnostic_result: Option<String>,
    pub follow_up_plan: Option<String>,
    pub detection_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a detection session. Built server-side from either
/// a device push or an operator upload, never deserialized directly.
#[derive(Debug, Clone)]
pub struct CreateDetectionSession {
    pub patient_id: DbId,
    pub user_id: DbId,
    pub detection_result: Option<Value>,
    pub diagnostic_result: Option<String>,
    pub follow_up_plan: Option<String>,
}

/// DTO for updating a session after review. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDetectionSession {
    pub detection_result: Option<Value>,
    pub diagnostic_result: Option<String>,
    pub follow_up_plan: Option<String>,
}

/// A session plus its stored images, newest image first.
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithImages {
    #[serde(flatten)]
    pub session: DetectionSession,
    pub images: Vec<DetectionImage>,
}
