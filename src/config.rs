use crate::error::{GatewayError, Result};
use clap::{Parser, ValueEnum};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Which backend fills a provider slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Paypal,
    Stripe,
    /// Leave the slot empty.
    #[value(name = "none")]
    Disabled,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Paypal => f.write_str("paypal"),
            ProviderKind::Stripe => f.write_str("stripe"),
            ProviderKind::Disabled => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration of the gateway, read from flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Payment gateway with primary/secondary provider failover", long_about = None)]
pub struct GatewayConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to (0 picks a free port)
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Upper bound for handling a single inbound request, in seconds
    #[arg(long, env = "SERVER_TIMEOUT", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Upper bound for a single provider call, in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT", default_value_t = 10)]
    pub provider_timeout_secs: u64,

    #[arg(long, env = "PRIMARY_PROVIDER", value_enum, default_value_t = ProviderKind::Paypal)]
    pub primary: ProviderKind,

    #[arg(long, env = "SECONDARY_PROVIDER", value_enum, default_value_t = ProviderKind::Stripe)]
    pub secondary: ProviderKind,

    /// Base URL of the PayPal-like backend
    #[arg(long, env = "PAYPAL_MOCK_URL", default_value = "http://paypal-mock:8081")]
    pub paypal_url: Url,

    /// Base URL of the Stripe-like backend
    #[arg(long, env = "STRIPE_MOCK_URL", default_value = "http://stripe-mock:8082")]
    pub stripe_url: Url,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Rejects configurations that cannot serve any request.
    pub fn validate(&self) -> Result<()> {
        if self.primary == ProviderKind::Disabled && self.secondary == ProviderKind::Disabled {
            return Err(GatewayError::Config {
                message: "at least one of --primary and --secondary must name a provider"
                    .to_string(),
            });
        }
        if self.provider_timeout_secs == 0 {
            return Err(GatewayError::Config {
                message: "--provider-timeout-secs must be greater than zero".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(GatewayError::Config {
                message: "--request-timeout-secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
