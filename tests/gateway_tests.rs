//! Integration tests for the HTTP gateway
//!
//! Drives the real client against an in-process fake of the remote
//! content API.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use catalogd::error::ApiError;
use catalogd::forms::{self, FormKind, LeadSubmission};
use catalogd::{ApiClient, RequestOptions};

// == Helpers ==

/// Initializes logging once per test binary; RUST_LOG overrides the default.
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

async fn spawn_api(app: Router) -> SocketAddr {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn fake_api() -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "Leadership", "slug": "leadership"},
                ]))
            }),
        )
        .route(
            "/api/broken",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "upstream exploded"})),
                )
            }),
        )
        .route(
            "/api/broken-silent",
            get(|| async { StatusCode::BAD_GATEWAY.into_response() }),
        )
        .route(
            "/api/plain",
            get(|| async { "just text" }),
        )
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({"late": true}))
            }),
        )
        .route(
            "/api/forms/register",
            post(|| async { Json(json!({"message": "lead received"})) }),
        )
}

async fn client() -> ApiClient {
    let addr = spawn_api(fake_api()).await;
    ApiClient::new(&format!("http://{}", addr)).unwrap()
}

// == Success Envelope ==

#[tokio::test]
async fn test_success_returns_uniform_envelope() {
    let client = client().await;

    let response = client
        .get("/categories", RequestOptions::default())
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.status, 200);
    assert_eq!(response.message, "OK");
    assert_eq!(response.data[0]["slug"], json!("leadership"));
}

#[tokio::test]
async fn test_non_json_body_is_decoded_as_string() {
    let client = client().await;

    let response = client.get("/plain", RequestOptions::default()).await.unwrap();

    assert_eq!(response.data, Value::String("just text".to_string()));
}

// == Failure Classification ==

#[tokio::test]
async fn test_server_message_is_surfaced_on_failure() {
    let client = client().await;

    let error = client
        .get("/broken", RequestOptions::default())
        .await
        .unwrap_err();

    match error {
        ApiError::RequestFailed { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_without_message_is_synthesized() {
    let client = client().await;

    let error = client
        .get("/broken-silent", RequestOptions::default())
        .await
        .unwrap_err();

    match error {
        ApiError::RequestFailed { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "HTTP error! status: 502");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_deadline_exceeded_is_a_distinct_timeout() {
    let client = client().await;

    let options = RequestOptions {
        timeout: Some(Duration::from_millis(50)),
        ..RequestOptions::default()
    };
    let error = client.get("/slow", options).await.unwrap_err();

    assert!(matches!(error, ApiError::Timeout(_)));
}

#[tokio::test]
async fn test_no_timeout_by_default() {
    let client = client().await;

    // The slow endpoint responds in 500ms; with no deadline set this
    // must succeed rather than abort.
    let response = client.get("/slow", RequestOptions::default()).await.unwrap();
    assert_eq!(response.data["late"], json!(true));
}

// == Form Submission ==

#[tokio::test]
async fn test_lead_form_submission_round_trip() {
    let client = client().await;

    let lead = LeadSubmission {
        name: "Amira".to_string(),
        email: "amira@example.com".to_string(),
        phone: "+971500000000".to_string(),
        course_slug: Some("leading-teams".to_string()),
        ..Default::default()
    };

    let response = forms::submit(&client, FormKind::Register, &lead)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "lead received");
}
