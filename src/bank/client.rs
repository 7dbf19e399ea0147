use super::AcquiringBank;
use crate::domain::{BankOutcome, PaymentRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BANK_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_LOG_LIMIT: usize = 200;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("bank request timed out")]
    Timeout,
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),
    #[error("bank service unavailable")]
    ServiceUnavailable,
    #[error("bank returned error status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("invalid response from bank: {0}")]
    InvalidResponse(String),
}

impl BankError {
    /// True when the bank explicitly reported itself as temporarily unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, BankError::ServiceUnavailable)
    }
}

impl From<reqwest::Error> for BankError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BankError::Timeout
        } else {
            BankError::Transport(err)
        }
    }
}

/// Request body in the bank's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankPaymentRequest {
    pub card_number: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl From<&PaymentRequest> for BankPaymentRequest {
    fn from(request: &PaymentRequest) -> Self {
        Self {
            card_number: request.card_number.clone(),
            expiry_date: format_expiry_date(request.expiry_month, request.expiry_year),
            currency: request.currency.clone(),
            amount: request.amount,
            cvv: request.cvv.clone(),
        }
    }
}

/// Renders month/year as `MM/YY`, taking the last two digits of the year.
pub fn format_expiry_date(month: i32, year: i32) -> String {
    format!("{:02}/{:02}", month, year.rem_euclid(100))
}

/// HTTP client for the acquiring bank's `/payments` endpoint.
#[derive(Clone)]
pub struct HttpBankClient {
    client: Client,
    base_url: String,
}

impl HttpBankClient {
    /// Creates a client whose every exchange is bounded by `timeout`.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, BankError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpBankClient { client, base_url })
    }

    fn payments_url(&self) -> String {
        format!("{}/payments", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AcquiringBank for HttpBankClient {
    async fn authorize(&self, request: &PaymentRequest) -> Result<BankOutcome, BankError> {
        let body = BankPaymentRequest::from(request);

        let response = self
            .client
            .post(self.payments_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Bank request failed");
                BankError::from(e)
            })?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::warn!("Bank reported service unavailable");
            return Err(BankError::ServiceUnavailable);
        }
        if !status.is_success() {
            let body = read_bounded(response, ERROR_BODY_LOG_LIMIT).await;
            tracing::warn!(status = status.as_u16(), "Bank returned error status");
            return Err(BankError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let outcome: BankOutcome = serde_json::from_slice(&bytes)
            .map_err(|e| BankError::InvalidResponse(e.to_string()))?;

        tracing::debug!(authorized = outcome.authorized, "Bank exchange completed");
        Ok(outcome)
    }
}

/// Reads at most `limit` bytes of an error body; the rest is never buffered.
async fn read_bounded(mut response: reqwest::Response, limit: usize) -> String {
    let mut buf = Vec::with_capacity(limit);
    while buf.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(limit - buf.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
