//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use dermatrack_core::error::CoreError;
use dermatrack_core::types::DbId;
use dermatrack_db::models::auth_session::CreateAuthSession;
use dermatrack_db::repositories::{AuthSessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an opaque bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(username = %input.username, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 3. Generate a token and persist only its hash.
    let (plaintext, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.auth.session_expire_days);
    AuthSessionRepo::create(
        &state.pool,
        &CreateAuthSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(username = %user.username, "Login succeeded");

    Ok(Json(AuthResponse {
        token: plaintext,
        expires_in: state.config.auth.session_expire_days * 86_400,
        user: UserInfo {
            id: user.id,
            username: user.username,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = AuthSessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "Logout");
    Ok(StatusCode::NO_CONTENT)
}
