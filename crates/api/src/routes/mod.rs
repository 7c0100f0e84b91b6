pub mod auth;
pub mod detection;
pub mod files;
pub mod health;
pub mod patients;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/logout                 logout (requires auth)
///
/// /patients                    list, create
/// /patients/lookup/qr          look up by QR card image (POST)
/// /patients/{id}               full details by code (GET), update, delete
/// /patients/{id}/sessions      create session with images (POST, multipart)
///
/// /sessions/{id}               update (PUT), delete
/// /sessions/{id}/images        append images (POST, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout).
        .nest("/auth", auth::router())
        // Patient records, QR lookup, and per-patient session creation.
        .nest("/patients", patients::router())
        // Session review updates, image appends, deletion.
        .nest("/sessions", sessions::router())
}
