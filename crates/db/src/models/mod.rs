//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod auth_session;
pub mod detection_image;
pub mod detection_session;
pub mod patient;
pub mod user;
