use crate::application::service::PaymentService;
use crate::config::{GatewayConfig, ProviderKind};
use crate::domain::ports::GatewayBox;
use crate::error::{GatewayError, Result};
use crate::infrastructure::paypal::client::PaypalClient;
use crate::infrastructure::stripe::client::StripeClient;
use crate::interfaces::http;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Everything the gateway needs to serve, wired once at startup.
pub struct Application {
    bind_address: String,
    router: Router,
}

impl Application {
    /// Validates `config` and builds the provider clients, the service and the router.
    pub fn build(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let primary = build_gateway(config.primary, &config)?;
        let secondary = build_gateway(config.secondary, &config)?;
        tracing::info!(
            primary = %config.primary,
            secondary = %config.secondary,
            "payment providers configured"
        );
        let service = PaymentService::with_slots(primary, secondary);
        Ok(Self::from_service(&config, service))
    }

    /// Serves an already assembled service with the transport settings of `config`.
    pub fn from_service(config: &GatewayConfig, service: PaymentService) -> Self {
        Self {
            bind_address: config.bind_address(),
            router: http::router(Arc::new(service), config.request_timeout()),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the listener and serves in the background until [`RunningApplication::stop`].
    pub async fn start(self) -> Result<RunningApplication> {
        let listener = TcpListener::bind(&self.bind_address).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let router = self.router;
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });
        tracing::info!(%local_addr, "payment gateway listening");

        Ok(RunningApplication {
            local_addr,
            shutdown,
            handle,
        })
    }

    /// Serves in the foreground until `signal` resolves.
    pub async fn run_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.bind_address).await?;
        tracing::info!(local_addr = %listener.local_addr()?, "payment gateway listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;
        tracing::info!("payment gateway stopped");
        Ok(())
    }
}

/// Handle to a gateway serving in the background.
pub struct RunningApplication {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningApplication {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    pub async fn stop(self) -> Result<()> {
        // The server may already be gone, in which case the join below reports why.
        let _ = self.shutdown.send(());
        self.handle
            .await
            .map_err(|err| GatewayError::Io(std::io::Error::other(err)))??;
        tracing::info!(local_addr = %self.local_addr, "payment gateway stopped");
        Ok(())
    }
}

fn build_gateway(kind: ProviderKind, config: &GatewayConfig) -> Result<Option<GatewayBox>> {
    let timeout = config.provider_timeout();
    let gateway: GatewayBox = match kind {
        ProviderKind::Paypal => Box::new(PaypalClient::new(config.paypal_url.clone(), timeout)?),
        ProviderKind::Stripe => Box::new(StripeClient::new(config.stripe_url.clone(), timeout)?),
        ProviderKind::Disabled => return Ok(None),
    };
    Ok(Some(gateway))
}
