//! HTTP-level integration tests for the unauthenticated device push
//! endpoint. The device firmware retries on any non-200 response, so every
//! outcome here must come back as HTTP 200 with the result in the body.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json_auth, Part};
use sqlx::PgPool;

const DETECTION_JSON: &str = r#"{"confidence": 0.87, "detection": "Melanocytic Nevus"}"#;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a patient through the operator API and return its business code.
async fn register_patient(app: Router, token: &str) -> String {
    let body = serde_json::json!({
        "name": "Jane Doe",
        "sex": "Female",
        "date_of_birth": "1988-06-15",
        "phone": "5551234567",
    });
    let response = post_json_auth(app, "/api/v1/patients", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["code"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

/// A valid push stores the session under the operator account and reports
/// the new session id.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_creates_session(pool: PgPool) {
    let (app, storage) = common::build_test_app(pool).await;
    let token = common::login_for_token(app.clone()).await;
    let code = register_patient(app.clone(), &token).await;

    let body = common::multipart_body(&[
        Part::File {
            name: "images",
            filename: "capture_a.jpg",
            content_type: "image/jpeg",
            data: b"fake-device-capture-a",
        },
        Part::File {
            name: "images",
            filename: "capture_b.jpg",
            content_type: "image/jpeg",
            data: b"fake-device-capture-b",
        },
        Part::Text {
            name: "detection_result",
            value: DETECTION_JSON,
        },
    ]);
    // No bearer token: the device is not authenticated.
    let uri = format!("/api/detection/{code}");
    let response = common::post_multipart(app.clone(), &uri, None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Detection session created");
    let session_id = json["session_id"].as_i64().expect("session_id must be a number");
    assert!(session_id > 0);

    // The session shows up in the operator's record view with both photos
    // and the pushed detection result.
    let response = get_auth(app, &format!("/api/v1/patients/{code}"), &token).await;
    let details = body_json(response).await;
    let sessions = details["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], session_id);
    assert_eq!(sessions[0]["detection_result"]["detection"], "Melanocytic Nevus");
    assert!(sessions[0]["diagnostic_result"].is_null());

    let images = sessions[0]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    for image in images {
        let path = image["image_path"].as_str().unwrap();
        assert!(storage.path().join(path).is_file());
    }
}

// ---------------------------------------------------------------------------
// Rejections (still HTTP 200, error in body)
// ---------------------------------------------------------------------------

/// A push for an unregistered code reports the error in the body.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_unknown_code_reports_error(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool).await;

    let body = common::multipart_body(&[
        Part::File {
            name: "images",
            filename: "capture.jpg",
            content_type: "image/jpeg",
            data: b"fake-device-capture",
        },
        Part::Text {
            name: "detection_result",
            value: DETECTION_JSON,
        },
    ]);
    let response =
        common::post_multipart(app, "/api/detection/P-20240101-999", None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Patient not found");
    assert!(json.get("session_id").is_none());
}

/// A push without any image parts is rejected before the result is read.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_without_images_reports_error(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool).await;
    let token = common::login_for_token(app.clone()).await;
    let code = register_patient(app.clone(), &token).await;

    let body = common::multipart_body(&[Part::Text {
        name: "detection_result",
        value: DETECTION_JSON,
    }]);
    let response = common::post_multipart(app, &format!("/api/detection/{code}"), None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No images provided");
}

/// A push without the detection_result field is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_without_detection_result_reports_error(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool).await;
    let token = common::login_for_token(app.clone()).await;
    let code = register_patient(app.clone(), &token).await;

    let body = common::multipart_body(&[Part::File {
        name: "images",
        filename: "capture.jpg",
        content_type: "image/jpeg",
        data: b"fake-device-capture",
    }]);
    let response = common::post_multipart(app, &format!("/api/detection/{code}"), None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing detection_result field");
}

/// A push whose detection_result is not valid JSON is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_with_bad_detection_json_reports_error(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool).await;
    let token = common::login_for_token(app.clone()).await;
    let code = register_patient(app.clone(), &token).await;

    let body = common::multipart_body(&[
        Part::File {
            name: "images",
            filename: "capture.jpg",
            content_type: "image/jpeg",
            data: b"fake-device-capture",
        },
        Part::Text {
            name: "detection_result",
            value: "oops, not json",
        },
    ]);
    let response = common::post_multipart(app, &format!("/api/detection/{code}"), None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(
        error.starts_with("Validation failed: Invalid detection result JSON"),
        "unexpected error: {error}"
    );
}

/// A push with a non-image file is rejected and nothing is stored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn push_with_unsupported_file_reports_error(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool).await;
    let token = common::login_for_token(app.clone()).await;
    let code = register_patient(app.clone(), &token).await;

    let body = common::multipart_body(&[
        Part::File {
            name: "images",
            filename: "clip.mp4",
            content_type: "video/mp4",
            data: b"not an image",
        },
        Part::Text {
            name: "detection_result",
            value: DETECTION_JSON,
        },
    ]);
    let response =
        common::post_multipart(app.clone(), &format!("/api/detection/{code}"), None, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Validation failed: Unsupported image format '.mp4'. Supported: .jpg, .jpeg, .png, .webp"
    );

    // No session was recorded.
    let response = get_auth(app, &format!("/api/v1/patients/{code}"), &token).await;
    let details = body_json(response).await;
    assert!(details["sessions"].as_array().unwrap().is_empty());
}
