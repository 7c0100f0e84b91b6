//! Shared helpers for the HTTP-level integration tests.
//!
//! `build_test_app` runs the same startup sequence and router construction
//! as `main.rs`, so tests exercise the exact middleware stack (CORS,
//! request ID, timeout, tracing, panic recovery) that production uses.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use dermatrack_api::bootstrap;
use dermatrack_api::config::{AuthConfig, ServerConfig};
use dermatrack_api::router::build_app_router;
use dermatrack_api::state::AppState;

/// Operator credentials provisioned by [`build_test_app`].
pub const TEST_USERNAME: &str = "admin-user";
pub const TEST_PASSWORD: &str = "admin123user";

/// Build a test `ServerConfig` rooted at the given storage directory.
///
/// Uses `http://localhost:8501` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 50 * 1024 * 1024,
        storage_root: storage_root.to_path_buf(),
        auth: AuthConfig {
            operator_username: TEST_USERNAME.to_string(),
            operator_password: TEST_PASSWORD.to_string(),
            session_expire_days: 30,
        },
    }
}

/// Build the full application router against the given pool, with storage
/// rooted in a fresh temporary directory.
///
/// Runs the startup tasks from `main.rs` (operator upsert, storage
/// directory creation, stale session cleanup), so [`TEST_USERNAME`] /
/// [`TEST_PASSWORD`] can log in immediately. The returned `TempDir` must be
/// kept alive for the duration of the test; dropping it deletes the stored
/// files. Clone the `Router` for each request.
pub async fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    let storage = tempfile::tempdir().expect("tempdir creation should succeed");
    let config = test_config(storage.path());

    let operator_id = bootstrap::prepare(&pool, &config)
        .await
        .expect("startup preparation should succeed");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        operator_id,
    };

    (build_app_router(state, &config), storage)
}

/// Log in as the provisioned operator and return the bearer token.
pub async fn login_for_token(app: Router) -> String {
    let body = serde_json::json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "operator login should succeed"
    );
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response should contain a token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collection should succeed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// Boundary string used by [`multipart_body`].
pub const BOUNDARY: &str = "dermatrack-test-boundary";

/// One part of a synthetic `multipart/form-data` body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Assemble a `multipart/form-data` body from the given parts.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart body assembled by [`multipart_body`], optionally with a
/// bearer token.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Vec<u8>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}
