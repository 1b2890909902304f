//! Payments
//!
//! Simulated gateway: confirming a payment only moves the order to `paid`.

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::PaymentsServiceError;
pub use service::*;
