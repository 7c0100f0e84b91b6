//! Repository for the `detection_sessions` table.

use dermatrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::detection_image::DetectionImage;
use crate::models::detection_session::{
    CreateDetectionSession, DetectionSession, SessionWithImages, UpdateDetectionSession,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, patient_id, user_id, detection_result, diagnostic_result, \
    follow_up_plan, detection_date, created_at, updated_at";

/// Image column list, duplicated here because the transactional helpers
/// insert and re-read image rows inside the same connection.
const IMAGE_COLUMNS: &str = "id, detection_session_id, image_path, created_at";

/// Provides CRUD operations for detection sessions, including the
/// transactional session-plus-images writes.
pub struct DetectionSessionRepo;

impl DetectionSessionRepo {
    /// Insert a session and its image rows in one transaction.
    ///
    /// `image_paths` are storage-relative paths of files already written
    /// to disk. If any insert fails the whole transaction rolls back and
    /// no session row remains.
    pub async fn create_with_images(
        pool: &PgPool,
        input: &CreateDetectionSession,
        image_paths: &[String],
    ) -> Result<SessionWithImages, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO detection_sessions
                (patient_id, user_id, detection_result, diagnostic_result, follow_up_plan)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, DetectionSession>(&query)
            .bind(input.patient_id)
            .bind(input.user_id)
            .bind(&input.detection_result)
            .bind(&input.diagnostic_result)
            .bind(&input.follow_up_plan)
            .fetch_one(&mut *tx)
            .await?;

        for path in image_paths {
            sqlx::query(
                "INSERT INTO detection_images (detection_session_id, image_path) VALUES ($1, $2)",
            )
            .bind(session.id)
            .bind(path)
            .execute(&mut *tx)
            .await?;
        }

        let images_query = format!(
            "SELECT {IMAGE_COLUMNS} FROM detection_images
             WHERE detection_session_id = $1
             ORDER BY created_at DESC"
        );
        let images = sqlx::query_as::<_, DetectionImage>(&images_query)
            .bind(session.id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SessionWithImages { session, images })
    }

    /// Update a session and append image rows in one transaction. Only
    /// non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no session with the given `id` exists for this owner.
    pub async fn update_with_images(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDetectionSession,
        image_paths: &[String],
    ) -> Result<Option<SessionWithImages>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE detection_sessions SET
                detection_result = COALESCE($3, detection_result),
                diagnostic_result = COALESCE($4, diagnostic_result),
                follow_up_plan = COALESCE($5, follow_up_plan),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(session) = sqlx::query_as::<_, DetectionSession>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.detection_result)
            .bind(&input.diagnostic_result)
            .bind(&input.follow_up_plan)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        for path in image_paths {
            sqlx::query(
                "INSERT INTO detection_images (detection_session_id, image_path) VALUES ($1, $2)",
            )
            .bind(session.id)
            .bind(path)
            .execute(&mut *tx)
            .await?;
        }

        let images_query = format!(
            "SELECT {IMAGE_COLUMNS} FROM detection_images
             WHERE detection_session_id = $1
             ORDER BY created_at DESC"
        );
        let images = sqlx::query_as::<_, DetectionImage>(&images_query)
            .bind(session.id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(SessionWithImages { session, images }))
    }

    /// Find a session by internal ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DetectionSession>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM detection_sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, DetectionSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all sessions for a patient, newest detection first.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<DetectionSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detection_sessions
             WHERE patient_id = $1 AND user_id = $2
             ORDER BY detection_date DESC"
        );
        sqlx::query_as::<_, DetectionSession>(&query)
            .bind(patient_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a session by ID, scoped to its owner. Returns `true` if a
    /// row was removed. Image rows go with it by cascade.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM detection_sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
