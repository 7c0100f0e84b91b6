//! Startup tasks that run once before the server accepts traffic.

use dermatrack_core::types::DbId;
use dermatrack_db::models::user::CreateUser;
use dermatrack_db::repositories::{AuthSessionRepo, UserRepo};
use dermatrack_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Prepare the runtime environment: upsert the operator account, create the
/// storage directories, and purge stale auth sessions.
///
/// Returns the operator's internal ID for [`crate::state::AppState`].
pub async fn prepare(pool: &DbPool, config: &ServerConfig) -> AppResult<DbId> {
    let password_hash = hash_password(&config.auth.operator_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let operator = UserRepo::upsert_operator(
        pool,
        &CreateUser {
            username: config.auth.operator_username.clone(),
            password_hash,
        },
    )
    .await?;
    tracing::info!(username = %operator.username, "Operator account ready");

    let store = config.image_store();
    for dir in [store.images_dir(), store.qr_dir()] {
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::InternalError(format!(
                "Failed to create storage dir {}: {e}",
                dir.display()
            ))
        })?;
    }
    tracing::info!(root = %config.storage_root.display(), "Storage directories ready");

    let purged = AuthSessionRepo::cleanup_expired(pool).await?;
    if purged > 0 {
        tracing::info!(purged, "Removed stale auth sessions");
    }

    Ok(operator.id)
}
