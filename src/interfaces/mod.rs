//! Inbound adapters exposing the payment service to the outside world.

pub mod http;
