//! Route definitions for the `/patients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{patient, qr_lookup, session};
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// `{id}` carries the business code (`P-YYYYMMDD-NNN`) for GET, which is
/// how the record view addresses patients, and the numeric internal ID
/// for PUT and DELETE.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// POST   /lookup/qr      -> look up by QR card image
/// GET    /{id}           -> full details by business code
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/sessions  -> create detection session (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(patient::list).post(patient::create))
        .route("/lookup/qr", post(qr_lookup::lookup))
        .route(
            "/{id}",
            get(patient::get_by_code)
                .put(patient::update)
                .delete(patient::delete),
        )
        .route("/{id}/sessions", post(session::create_for_patient))
}
