//! JSON over HTTP transport for the payment service.

pub mod error;
pub mod inbound;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::router;
