pub mod adapters;
pub mod bank;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod utils;
pub mod validation;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::adapters::InMemoryPaymentRepository;
use crate::bank::HttpBankClient;
use crate::config::Config;
use crate::services::PaymentService;
use crate::validation::{PaymentValidator, SystemClock, ValidationRules};

#[derive(Clone)]
pub struct AppState {
    pub payment_service: PaymentService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(payment_service: PaymentService) -> Self {
        Self {
            payment_service,
            start_time: Instant::now(),
        }
    }

    /// Wires the HTTP bank client, the system clock and an in-memory store.
    /// Fails on an invalid config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let bank = HttpBankClient::new(config.bank_url.clone(), config.bank_timeout())?;
        let validator = PaymentValidator::new(
            ValidationRules::new(config.supported_currencies.iter().cloned()),
            Arc::new(SystemClock),
        );
        let service = PaymentService::new(
            validator,
            Arc::new(bank),
            Arc::new(InMemoryPaymentRepository::new()),
        );
        Ok(Self::new(service))
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/api/payments", post(handlers::payments::create_payment))
        .route("/api/payments/:id", get(handlers::payments::get_payment))
        .with_state(state)
}

/// `create_app` plus the request logger, request timeout and optional CORS.
pub fn create_app_with_layers(state: AppState, config: &Config) -> Router {
    let mut app = create_app(state)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(axum::middleware::from_fn_with_state(
            config.log_request_body,
            middleware::request_logger::request_logger_middleware,
        ));

    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if !origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        );
    }

    app
}
