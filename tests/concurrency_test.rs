mod common;

use common::payment_service;
use futures::future::join_all;
use payment_gateway::adapters::InMemoryPaymentRepository;
use payment_gateway::domain::{PaymentRequest, PaymentStatus};
use std::collections::HashSet;
use std::time::Duration;

fn request(i: usize) -> PaymentRequest {
    PaymentRequest {
        card_number: format!("{:016}", 4_000_000_000_000_000u64 + i as u64),
        expiry_month: 12,
        expiry_year: 2099,
        currency: "EUR".to_string(),
        amount: 100 + i as i64,
        cvv: "123".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_are_all_stored() {
    let mut bank = mockito::Server::new_async().await;
    let _mock = bank
        .mock("POST", "/payments")
        .with_status(200)
        .with_body(r#"{"authorized": true, "authorization_code": "C"}"#)
        .expect(32)
        .create_async()
        .await;

    let store = InMemoryPaymentRepository::new();
    let service = payment_service(bank.url(), Duration::from_secs(5), store.clone());

    let tasks = (0..32).map(|i| {
        let service = service.clone();
        tokio::spawn(async move { service.create_payment(request(i)).await })
    });
    let responses: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let ids: HashSet<_> = responses.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 32);
    assert_eq!(store.len().await, 32);

    let lookups = responses.iter().map(|r| service.get_payment(&r.id));
    for (found, created) in join_all(lookups).await.into_iter().zip(&responses) {
        let found = found.unwrap().unwrap();
        assert_eq!(&found, created);
        assert_eq!(found.status, PaymentStatus::Authorized);
    }
}
