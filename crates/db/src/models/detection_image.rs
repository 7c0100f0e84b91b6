//! Detection image entity model and DTOs.

use dermatrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `detection_images` table.
///
/// Image rows are append-only: they are inserted when an upload lands
/// and removed only by cascade when their session is deleted, so the
/// table has no `updated_at` column.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetectionImage {
    pub id: DbId,
    pub detection_session_id: DbId,
    pub image_path: String,
    pub created_at: Timestamp,
}

/// DTO for recording a stored image file.
#[derive(Debug, Clone)]
pub struct CreateDetectionImage {
    pub detection_session_id: DbId,
    pub image_path: String,
}
