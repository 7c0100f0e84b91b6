//! Patient entity model and DTOs.

use chrono::NaiveDate;
use dermatrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::detection_session::SessionWithImages;

/// A patient row from the `patients` table.
///
/// `age` is not a stored column: every query derives it from
/// `date_of_birth` in its SELECT list, so it can never go stale.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub user_id: DbId,
    pub code: String,
    pub name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub phone: String,
    pub address: Option<String>,
    pub past_medical_history: Option<String>,
    pub present_illness_history: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new patient. The business code is generated
/// server-side, never supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: Option<String>,
    pub past_medical_history: Option<String>,
    pub present_illness_history: Option<String>,
}

/// DTO for updating an existing patient. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub past_medical_history: Option<String>,
    pub present_illness_history: Option<String>,
}

/// A patient plus their full visit history, newest session first.
#[derive(Debug, Clone, Serialize)]
pub struct PatientFullDetails {
    #[serde(flatten)]
    pub patient: Patient,
    pub sessions: Vec<SessionWithImages>,
}
