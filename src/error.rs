use std::fmt;
use thiserror::Error;

/// The two ordered provider positions the orchestrator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSlot {
    Primary,
    Secondary,
}

impl fmt::Display for ProviderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSlot::Primary => f.write_str("primary"),
            ProviderSlot::Secondary => f.write_str("secondary"),
        }
    }
}

/// Public operations exposed by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Refund,
    Get,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("process payment"),
            Operation::Refund => f.write_str("refund payment"),
            Operation::Get => f.write_str("retrieve payment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid request for {provider}: {reason}")]
    InvalidRequestShape { provider: String, reason: String },

    #[error("{provider} has no payment with id '{payment_id}'")]
    NotFound {
        provider: String,
        payment_id: String,
    },

    #[error("{provider} backend error: {reason}")]
    BackendError { provider: String, reason: String },

    #[error("{provider} returned an unsupported response: {reason}")]
    UnsupportedResponseShape { provider: String, reason: String },

    #[error("no provider configured for the {slot} slot")]
    ProviderUnavailable { slot: ProviderSlot },

    #[error("both providers failed to {operation}: primary: {primary}; secondary: {secondary}")]
    BothProvidersFailed {
        operation: Operation,
        primary: Box<GatewayError>,
        secondary: Box<GatewayError>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn backend(provider: &str, reason: impl fmt::Display) -> Self {
        Self::BackendError {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_request(provider: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidRequestShape {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unsupported_response(provider: &str, reason: impl fmt::Display) -> Self {
        Self::UnsupportedResponseShape {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(provider: &str, payment_id: &str) -> Self {
        Self::NotFound {
            provider: provider.to_string(),
            payment_id: payment_id.to_string(),
        }
    }

    /// True when every provider that was consulted reported the payment as unknown.
    pub fn is_not_found(&self) -> bool {
        match self {
            GatewayError::NotFound { .. } => true,
            GatewayError::BothProvidersFailed {
                primary, secondary, ..
            } => primary.is_not_found() && secondary.is_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
