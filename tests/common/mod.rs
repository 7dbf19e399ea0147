#![allow(dead_code)]

use payment_gateway::adapters::InMemoryPaymentRepository;
use payment_gateway::bank::HttpBankClient;
use payment_gateway::services::PaymentService;
use payment_gateway::validation::{FixedClock, PaymentValidator, ValidationRules};
use payment_gateway::{create_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub struct TestApp {
    pub base_url: String,
    pub store: InMemoryPaymentRepository,
}

pub fn payment_service(
    bank_url: String,
    bank_timeout: Duration,
    store: InMemoryPaymentRepository,
) -> PaymentService {
    let bank = HttpBankClient::new(bank_url, bank_timeout).unwrap();
    let validator =
        PaymentValidator::new(ValidationRules::default(), Arc::new(FixedClock::at(2026, 6)));
    PaymentService::new(validator, Arc::new(bank), Arc::new(store))
}

pub async fn spawn_app(bank_url: String, bank_timeout: Duration) -> TestApp {
    let store = InMemoryPaymentRepository::new();
    let service = payment_service(bank_url, bank_timeout, store.clone());
    let app = create_app(AppState::new(service));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        store,
    }
}

/// Address of a bank that accepts connections and never answers.
pub async fn silent_bank() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub fn valid_payment() -> Value {
    json!({
        "card_number": "1234567812345678",
        "expiry_month": 12,
        "expiry_year": 2099,
        "currency": "GBP",
        "amount": 100,
        "cvv": "123"
    })
}
