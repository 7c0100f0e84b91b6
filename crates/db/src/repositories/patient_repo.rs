//! Repository for the `patients` table.

use dermatrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::patient::{CreatePatient, Patient, PatientFullDetails, UpdatePatient};
use crate::repositories::detection_image_repo::DetectionImageRepo;
use crate::repositories::detection_session_repo::DetectionSessionRepo;

/// Column list shared across queries to avoid repetition.
///
/// `age` is derived from `date_of_birth` at query time so it never
/// drifts from the stored birth date.
const COLUMNS: &str = "id, user_id, code, name, sex, date_of_birth, \
    DATE_PART('year', AGE(date_of_birth))::int AS age, phone, address, \
    past_medical_history, present_illness_history, created_at, updated_at";

/// Provides CRUD operations for patients plus the aggregated
/// full-details lookup used by the record view.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient under the given owner, returning the created row.
    ///
    /// `code` must already be generated and validated by the caller; a
    /// duplicate surfaces as a unique violation on `uq_patients_code`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        code: &str,
        input: &CreatePatient,
    ) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients
                (user_id, code, name, sex, date_of_birth, phone, address,
                 past_medical_history, present_illness_history)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(user_id)
            .bind(code)
            .bind(&input.name)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.past_medical_history)
            .bind(&input.present_illness_history)
            .fetch_one(pool)
            .await
    }

    /// Find a patient by internal ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a patient by business code, scoped to its owner.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
        user_id: DbId,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE code = $1 AND user_id = $2");
        sqlx::query_as::<_, Patient>(&query)
            .bind(code)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all patients for a given owner, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patients
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a patient. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists for this owner.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                name = COALESCE($3, name),
                sex = COALESCE($4, sex),
                date_of_birth = COALESCE($5, date_of_birth),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                past_medical_history = COALESCE($8, past_medical_history),
                present_illness_history = COALESCE($9, present_illness_history),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.past_medical_history)
            .bind(&input.present_illness_history)
            .fetch_optional(pool)
            .await
    }

    /// Delete a patient by ID, scoped to its owner. Returns `true` if a
    /// row was removed. Sessions and image rows go with it by cascade.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a patient by business code together with every detection
    /// session and each session's images, newest session first.
    ///
    /// Returns `None` if the code does not match a patient for this owner.
    pub async fn full_details(
        pool: &PgPool,
        code: &str,
        user_id: DbId,
    ) -> Result<Option<PatientFullDetails>, sqlx::Error> {
        let Some(patient) = Self::find_by_code(pool, code, user_id).await? else {
            return Ok(None);
        };

        let sessions = DetectionSessionRepo::list_by_patient(pool, patient.id, user_id).await?;
        let mut with_images = Vec::with_capacity(sessions.len());
        for session in sessions {
            let images = DetectionImageRepo::list_by_session(pool, session.id).await?;
            with_images.push(crate::models::detection_session::SessionWithImages {
                session,
                images,
            });
        }

        Ok(Some(PatientFullDetails {
            patient,
            sessions: with_images,
        }))
    }
}
