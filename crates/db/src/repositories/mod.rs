//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod auth_session_repo;
pub mod detection_image_repo;
pub mod detection_session_repo;
pub mod patient_repo;
pub mod user_repo;

pub use auth_session_repo::AuthSessionRepo;
pub use detection_image_repo::DetectionImageRepo;
pub use detection_session_repo::DetectionSessionRepo;
pub use patient_repo::PatientRepo;
pub use user_repo::UserRepo;
