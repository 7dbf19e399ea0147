pub mod in_memory_payment_repository;

pub use in_memory_payment_repository::InMemoryPaymentRepository;
