//! Application layer containing the failover orchestration.
//!
//! [`service::PaymentService`] sequences primary-then-secondary attempts for
//! every payment operation and aggregates failures when both providers fail.

pub mod service;
