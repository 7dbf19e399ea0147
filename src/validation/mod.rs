pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::domain::PaymentRequest;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

pub const CARD_NUMBER_LEN: RangeInclusive<usize> = 14..=19;
pub const CVV_LEN: RangeInclusive<usize> = 3..=4;
pub const CURRENCY_CODE_LEN: usize = 3;
pub const DEFAULT_CURRENCIES: &[&str] = &["USD", "GBP", "EUR"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Immutable rule data handed to the validator at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub supported_currencies: Vec<String>,
}

impl ValidationRules {
    pub fn new<I, S>(currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_currencies: currencies.into_iter().map(Into::into).collect(),
        }
    }

    fn supports(&self, currency: &str) -> bool {
        self.supported_currencies.iter().any(|c| c == currency)
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES.iter().copied())
    }
}

/// Field-level checks for an inbound payment request.
///
/// Every rule runs; errors come back in field-group order (card number,
/// expiry, amount, currency, cvv). An empty list means the request is valid.
#[derive(Clone)]
pub struct PaymentValidator {
    rules: ValidationRules,
    clock: Arc<dyn Clock>,
}

impl PaymentValidator {
    pub fn new(rules: ValidationRules, clock: Arc<dyn Clock>) -> Self {
        Self { rules, clock }
    }

    pub fn validate(&self, request: &PaymentRequest) -> Vec<ValidationError> {
        let (current_year, current_month) = self.clock.year_month();

        let mut errors = validate_card_number(&request.card_number);
        errors.extend(validate_expiry(
            request.expiry_month,
            request.expiry_year,
            current_year,
            current_month,
        ));
        errors.extend(validate_amount(request.amount));
        errors.extend(validate_currency(&request.currency, &self.rules));
        errors.extend(validate_cvv(&request.cvv));
        errors
    }
}

impl Default for PaymentValidator {
    fn default() -> Self {
        Self::new(ValidationRules::default(), Arc::new(SystemClock))
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

pub fn validate_card_number(card_number: &str) -> Vec<ValidationError> {
    if card_number.is_empty() {
        return vec![ValidationError::new("card_number", "card number is required")];
    }

    let mut errors = Vec::new();
    if !CARD_NUMBER_LEN.contains(&card_number.len()) {
        errors.push(ValidationError::new(
            "card_number",
            format!(
                "card number must be between {}-{} characters long",
                CARD_NUMBER_LEN.start(),
                CARD_NUMBER_LEN.end()
            ),
        ));
    }
    if !is_numeric(card_number) {
        errors.push(ValidationError::new(
            "card_number",
            "card number must contain only numeric characters",
        ));
    }
    errors
}

/// Year checks, then month range, then the future-date cross-check.
pub fn validate_expiry(
    month: i32,
    year: i32,
    current_year: i32,
    current_month: i32,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if year == 0 {
        errors.push(ValidationError::new("expiry_year", "expiry year is required"));
    } else if year < current_year {
        errors.push(ValidationError::new(
            "expiry_year",
            "expiry year must be in the future",
        ));
    }

    if !(1..=12).contains(&month) {
        errors.push(ValidationError::new(
            "expiry_month",
            "expiry month must be between 1-12",
        ));
    }

    if year == current_year && month < current_month {
        errors.push(ValidationError::new(
            "expiry_month",
            "expiry date must be in the future",
        ));
    }

    errors
}

pub fn validate_amount(amount: i64) -> Vec<ValidationError> {
    if amount <= 0 {
        return vec![ValidationError::new(
            "amount",
            "amount must be a positive integer",
        )];
    }
    Vec::new()
}

pub fn validate_currency(currency: &str, rules: &ValidationRules) -> Vec<ValidationError> {
    if currency.is_empty() {
        return vec![ValidationError::new("currency", "currency is required")];
    }

    let mut errors = Vec::new();
    if currency.len() != CURRENCY_CODE_LEN {
        errors.push(ValidationError::new(
            "currency",
            format!("currency must be {} characters", CURRENCY_CODE_LEN),
        ));
    }
    if !rules.supports(currency) {
        errors.push(ValidationError::new(
            "currency",
            format!(
                "currency must be one of: {}",
                rules.supported_currencies.join(", ")
            ),
        ));
    }
    errors
}

pub fn validate_cvv(cvv: &str) -> Vec<ValidationError> {
    if cvv.is_empty() {
        return vec![ValidationError::new("cvv", "cvv is required")];
    }

    let mut errors = Vec::new();
    if !CVV_LEN.contains(&cvv.len()) {
        errors.push(ValidationError::new(
            "cvv",
            format!(
                "cvv must be {}-{} characters long",
                CVV_LEN.start(),
                CVV_LEN.end()
            ),
        ));
    }
    if !is_numeric(cvv) {
        errors.push(ValidationError::new(
            "cvv",
            "cvv must contain only numeric characters",
        ));
    }
    errors
}
