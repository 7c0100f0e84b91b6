//! Domain error taxonomy.
//!
//! Repositories surface raw `sqlx::Error`; everything above them speaks
//! [`CoreError`]. The API crate maps both onto HTTP responses.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by internal id came up empty.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule (missing field, bad format, bad value).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation contradicts existing state (e.g. a duplicate code).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or unusable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials, but the action is not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Anything that should never happen in a healthy deployment.
    #[error("Internal error: {0}")]
    Internal(String),
}
