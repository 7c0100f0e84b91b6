//! Auth session entity model and DTOs.

use dermatrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_sessions` table.
///
/// Only the SHA-256 hex digest of the bearer token is stored. The
/// plaintext token exists solely in the login response.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an auth session.
#[derive(Debug, Clone)]
pub struct CreateAuthSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
