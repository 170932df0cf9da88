use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;

use application_intake::api;
use application_intake::config::{
    Config, EmailConfig, ServerConfig, StorageBackend, StorageConfig,
};
use application_intake::mailer::Mailer;
use application_intake::object_store::{LocalStore, UrlSigner};
use application_intake::resume_store::ResumeStore;
use application_intake::storage::models::ApplicationStatus;
use application_intake::storage::Database;
use application_intake::AppState;

const PUBLIC_URL: &str = "http://localhost:8080";

/// Create a test AppState backed by a temporary database and object store.
fn test_state(temp_dir: &tempfile::TempDir, mailer: Option<Mailer>) -> Arc<AppState> {
    let data_dir = temp_dir.path().join("data");
    let resumes_dir = temp_dir.path().join("resumes");

    let config = Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            public_url: PUBLIC_URL.to_string(),
            data_dir: data_dir.to_string_lossy().to_string(),
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            local_storage_path: resumes_dir.to_string_lossy().to_string(),
            gcs_bucket: None,
            gcs_credentials_file: None,
        },
        email: None,
        admin_email: "hr@example.com".to_string(),
        resume_url_ttl_secs: 3600,
        download_signing_secret: "test-secret".to_string(),
    };

    let db = Database::open(&data_dir).expect("open test database");
    let signer = Arc::new(UrlSigner::new(
        config.download_signing_secret.as_bytes(),
        config.server.public_url.clone(),
    ));
    let store = LocalStore::new(&resumes_dir, Arc::clone(&signer))
        .expect("create test object store");
    let resumes = ResumeStore::new(
        Arc::new(store),
        Duration::from_secs(config.resume_url_ttl_secs),
    );

    Arc::new(AppState {
        config,
        db,
        resumes,
        mailer,
        signer,
    })
}

fn pdf_base64() -> String {
    base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.4 fake resume content")
}

fn valid_submission() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "position": "Engineer",
        "resume_base64": pdf_base64(),
    })
}

async fn post_submission(router: &axum::Router, body: String) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/applications")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload = serde_json::from_slice(&bytes).expect("json body");
    (status, payload)
}

fn stored_resumes(temp_dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(temp_dir.path().join("resumes"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_preflight_returns_cors_ok() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/applications")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["message"], "CORS OK");
}

#[tokio::test]
async fn test_missing_fields_return_400_without_side_effects() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state = test_state(&temp_dir, None);
    let router = api::create_router(Arc::clone(&state));

    for (field, mut body) in [
        ("name", valid_submission()),
        ("email", valid_submission()),
        ("position", valid_submission()),
    ] {
        body.as_object_mut().unwrap().remove(field);
        let (status, payload) = post_submission(&router, body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["message"], format!("{field} is required"));
    }

    // Empty strings are treated the same as absent fields
    let mut body = valid_submission();
    body["name"] = json!("");
    let (status, payload) = post_submission(&router, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "name is required");

    assert_eq!(stored_resumes(&temp_dir), 0, "no uploads should have happened");
}

#[tokio::test]
async fn test_invalid_email_returns_400() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let mut body = valid_submission();
    body["email"] = json!("not-an-email");
    let (status, payload) = post_submission(&router, body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Invalid email format");
}

#[tokio::test]
async fn test_missing_resume_returns_400() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let mut body = valid_submission();
    body.as_object_mut().unwrap().remove("resume_base64");
    let (status, payload) = post_submission(&router, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "resume_base64 is required");

    // Empty string counts as missing too
    let mut body = valid_submission();
    body["resume_base64"] = json!("");
    let (status, payload) = post_submission(&router, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "resume_base64 is required");
}

#[tokio::test]
async fn test_invalid_resume_payloads_return_400() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state = test_state(&temp_dir, None);
    let router = api::create_router(Arc::clone(&state));

    let mut body = valid_submission();
    body["resume_base64"] = json!("!!! not base64 !!!");
    let (status, payload) = post_submission(&router, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Invalid base64 resume");

    let mut body = valid_submission();
    body["resume_base64"] = json!(
        base64::engine::general_purpose::STANDARD.encode(b"PK\x03\x04 zip, not a pdf")
    );
    let (status, payload) = post_submission(&router, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Resume must be a PDF");

    assert_eq!(stored_resumes(&temp_dir), 0);
}

#[tokio::test]
async fn test_empty_body_returns_400() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let (status, payload) = post_submission(&router, String::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Missing request body");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let (status, payload) = post_submission(&router, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Malformed JSON in request body");
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/applications")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_successful_submission_persists_everything() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state = test_state(&temp_dir, None);
    let router = api::create_router(Arc::clone(&state));

    let (status, payload) = post_submission(&router, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "Application submitted successfully");

    let id = payload["application_id"].as_str().expect("id present");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "id is a well-formed uuid");

    // Exactly one record, referencing the uploaded resume
    let record = state
        .db
        .get_application(id)
        .unwrap()
        .expect("record persisted");
    assert_eq!(record.name, "Jane Doe");
    assert_eq!(record.email, "jane@x.com");
    assert_eq!(record.position, "Engineer");
    assert_eq!(record.status, ApplicationStatus::Submitted);
    assert!(record.resume_url.starts_with(PUBLIC_URL));
    assert!(record.resume_url.contains(&format!("{id}.pdf")));

    // Exactly one stored blob, with the decoded bytes
    assert_eq!(stored_resumes(&temp_dir), 1);
    let blob = std::fs::read(temp_dir.path().join("resumes").join(format!("{id}.pdf"))).unwrap();
    assert_eq!(blob, b"%PDF-1.4 fake resume content");
}

#[tokio::test]
async fn test_identical_submissions_get_distinct_ids() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state = test_state(&temp_dir, None);
    let router = api::create_router(Arc::clone(&state));

    let (_, first) = post_submission(&router, valid_submission().to_string()).await;
    let (_, second) = post_submission(&router, valid_submission().to_string()).await;

    let first_id = first["application_id"].as_str().unwrap();
    let second_id = second["application_id"].as_str().unwrap();

    assert_ne!(first_id, second_id);
    assert_eq!(stored_resumes(&temp_dir), 2);
    assert!(state.db.get_application(first_id).unwrap().is_some());
    assert!(state.db.get_application(second_id).unwrap().is_some());
}

#[tokio::test]
async fn test_signed_download_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state = test_state(&temp_dir, None);
    let router = api::create_router(Arc::clone(&state));

    let (_, payload) = post_submission(&router, valid_submission().to_string()).await;
    let id = payload["application_id"].as_str().unwrap();
    let record = state.db.get_application(id).unwrap().unwrap();

    // The presigned URL is on this service; drive it through the router
    let path = record
        .resume_url
        .strip_prefix(PUBLIC_URL)
        .expect("local URL");

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.4 fake resume content");

    // Tampering with the signature gets a 403
    let tampered = path.replace("signature=", "signature=AAAA");
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(tampered)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_failed_notifications_do_not_fail_submission() {
    let temp_dir = tempfile::tempdir().unwrap();

    // Nothing listens on this port; both sends will fail and be logged
    let email_config = EmailConfig {
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        from_address: "hr@example.com".to_string(),
        smtp_user: None,
        smtp_password: None,
    };
    let mailer = Mailer::new(&email_config, "hr@example.com").expect("build mailer");

    let state = test_state(&temp_dir, Some(mailer));
    let router = api::create_router(Arc::clone(&state));

    let (status, payload) = post_submission(&router, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let id = payload["application_id"].as_str().expect("id present");
    assert!(!id.is_empty());
    assert!(state.db.get_application(id).unwrap().is_some());
}

#[tokio::test]
async fn test_health() {
    let temp_dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&temp_dir, None));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/_internal/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["message"], "ok");
}
