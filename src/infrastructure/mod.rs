//! Concrete payment backends and the plumbing they share.

pub mod http;
pub mod ledger;
pub mod paypal;
pub mod stripe;
