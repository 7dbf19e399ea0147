//! Domain layer: framework-agnostic payment types.

pub mod payment;

pub use payment::{BankOutcome, PaymentRecord, PaymentRequest, PaymentResponse, PaymentStatus};
