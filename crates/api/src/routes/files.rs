//! Static file serving for stored images and QR cards.

use axum::Router;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// Serves straight from the storage root; filenames come from the
/// `image_path` values in API responses.
///
/// ```text
/// GET /images/{name}  -> stored lesion photo
/// GET /qr/{name}      -> generated QR card PNG
/// ```
pub fn router(config: &ServerConfig) -> Router<AppState> {
    let store = config.image_store();
    Router::new()
        .nest_service("/images", ServeDir::new(store.images_dir()))
        .nest_service("/qr", ServeDir::new(store.qr_dir()))
}
