//! Canonical payment model and the ports every payment backend plugs into.

pub mod money;
pub mod payment;
pub mod ports;
