//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `dermatrack_db`
//! and map errors via [`crate::error::AppError`]. The one exception is
//! [`detection_push`], which speaks the capture device's always-200
//! protocol instead.

pub mod auth;
pub mod detection_push;
pub mod patient;
pub mod qr_lookup;
pub mod session;
