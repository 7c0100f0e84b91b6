//! Repository for the `detection_images` table.

use dermatrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::detection_image::{CreateDetectionImage, DetectionImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, detection_session_id, image_path, created_at";

/// Provides append and list operations for detection images. Rows are
/// never updated; deletion happens by cascade from the session.
pub struct DetectionImageRepo;

impl DetectionImageRepo {
    /// Insert a new image row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDetectionImage,
    ) -> Result<DetectionImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO detection_images (detection_session_id, image_path)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DetectionImage>(&query)
            .bind(input.detection_session_id)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// List all images for a session, newest first.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<DetectionImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detection_images
             WHERE detection_session_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, DetectionImage>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }
}
