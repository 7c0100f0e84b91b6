//! Route definitions for the `/sessions` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// PUT    /{id}         -> update review fields
/// DELETE /{id}         -> delete
/// POST   /{id}/images  -> append images (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(session::update).delete(session::delete))
        .route("/{id}/images", post(session::append_images))
}
