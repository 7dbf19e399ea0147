mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{payment_service, silent_bank, valid_payment};
use payment_gateway::adapters::InMemoryPaymentRepository;
use payment_gateway::config::Config;
use payment_gateway::{create_app_with_layers, AppState};
use std::time::Duration;
use tower::ServiceExt;

fn layered_app(config: &Config) -> axum::Router {
    let service = payment_service(
        "http://127.0.0.1:9".to_string(),
        Duration::from_secs(1),
        InMemoryPaymentRepository::new(),
    );
    create_app_with_layers(AppState::new(service), config)
}

#[tokio::test]
async fn test_layers_add_request_id() {
    let response = layered_app(&Config::default())
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_reports_version() {
    let response = layered_app(&Config::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let config = Config {
        cors_allowed_origins: Some("http://shop.test".to_string()),
        ..Config::default()
    };

    let response = layered_app(&config)
        .oneshot(
            Request::builder()
                .uri("/ping")
                .header("origin", "http://shop.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://shop.test"
    );
}

#[tokio::test]
async fn test_rejected_payment_through_layers() {
    let config = Config {
        log_request_body: true,
        ..Config::default()
    };

    let response = layered_app(&config)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"card_number":"1234","cvv":"1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn post_payment(app: axum::Router) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments")
                .header("content-type", "application/json")
                .body(Body::from(valid_payment().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_bank_timeout_through_layers_is_bad_gateway() {
    let config = Config {
        bank_url: silent_bank().await,
        bank_timeout_secs: 1,
        request_timeout_secs: 3,
        ..Config::default()
    };
    let app = create_app_with_layers(AppState::from_config(&config).unwrap(), &config);

    let (status, body) = post_payment(app).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_bank_unavailable_through_layers_is_service_unavailable() {
    let mut bank = mockito::Server::new_async().await;
    let mock = bank
        .mock("POST", "/payments")
        .with_status(503)
        .create_async()
        .await;
    let config = Config {
        bank_url: bank.url(),
        ..Config::default()
    };
    let app = create_app_with_layers(AppState::from_config(&config).unwrap(), &config);

    let (status, body) = post_payment(app).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);
}

#[test]
fn test_from_config_rejects_request_timeout_within_bank_timeout() {
    let config = Config {
        bank_timeout_secs: 1,
        request_timeout_secs: 1,
        ..Config::default()
    };
    assert!(AppState::from_config(&config).is_err());
}
