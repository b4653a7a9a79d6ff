use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paygate::app::Application;
use paygate::config::GatewayConfig;
use paygate::logger::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::parse();
    config.validate().into_diagnostic()?;
    init_logger(&config.log_level, config.log_format);

    let app = Application::build(config).into_diagnostic()?;
    app.run_until(shutdown_signal()).await.into_diagnostic()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
