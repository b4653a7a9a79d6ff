//! Standalone mock of one payment backend, for local runs and end-to-end tests.

use axum::Router;
use axum::routing::get;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paygate::config::LogFormat;
use paygate::infrastructure::paypal::sandbox::PaypalSandbox;
use paygate::infrastructure::stripe::sandbox::StripeSandbox;
use paygate::logger::init_logger;
use tokio::net::TcpListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Paypal,
    Stripe,
}

impl Backend {
    fn default_port(self) -> u16 {
        match self {
            Backend::Paypal => 8081,
            Backend::Stripe => 8082,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "In-memory mock of a PayPal-like or Stripe-like backend", long_about = None)]
struct Cli {
    /// Which backend to imitate
    #[arg(long, value_enum)]
    backend: Backend,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Defaults to 8081 for paypal and 8082 for stripe
    #[arg(long)]
    port: Option<u16>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level, cli.log_format);

    let router = match cli.backend {
        Backend::Paypal => PaypalSandbox::new().router(),
        Backend::Stripe => StripeSandbox::new().router(),
    }
    .merge(Router::new().route("/healthz", get(|| async { "ok" })));

    let port = cli.port.unwrap_or_else(|| cli.backend.default_port());
    let listener = TcpListener::bind((cli.host.as_str(), port))
        .await
        .into_diagnostic()?;
    tracing::info!(backend = ?cli.backend, local_addr = %listener.local_addr().into_diagnostic()?, "mock provider listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .into_diagnostic()?;
    Ok(())
}
