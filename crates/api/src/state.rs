use std::sync::Arc;

use dermatrack_core::types::DbId;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dermatrack_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Internal ID of the operator account upserted at startup. Device
    /// pushes are recorded under this user.
    pub operator_id: DbId,
}
