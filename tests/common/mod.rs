#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use paygate::domain::payment::{Card, Method, Payment};
use paygate::domain::ports::{PaymentAdapter, PaymentProvider};
use paygate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;
use url::Url;

pub fn sample_payment(amount: Decimal) -> Payment {
    Payment::new(
        amount,
        "USD",
        "test order",
        Method::card(Card::new("4111111111111111", "John Doe", "123", "12/2025", 1)),
    )
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_router(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    BackendDown,
    Unknown,
}

/// Provider double that counts its calls and answers according to a fixed [`Outcome`].
#[derive(Clone)]
pub struct ScriptedProvider {
    name: &'static str,
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new(name: &'static str, outcome: Outcome) -> Self {
        Self {
            name,
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, still readable after the provider is boxed away.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn answer(&self, mut payment: Payment, payment_id: &str) -> Result<Payment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Succeed => {
                if payment.id.is_empty() {
                    payment.id = format!("{}-{}", self.name, payment_id);
                }
                payment.status = format!("served-by-{}", self.name);
                Ok(payment)
            }
            Outcome::BackendDown => Err(GatewayError::backend(self.name, "connection refused")),
            Outcome::Unknown => Err(GatewayError::not_found(self.name, payment_id)),
        }
    }
}

pub struct PassThrough;

impl PaymentAdapter for PassThrough {
    type Request = Payment;
    type Response = Payment;

    fn translate(payment: &Payment) -> Result<Payment> {
        Ok(payment.clone())
    }

    fn adapt(response: Payment) -> Result<Payment> {
        Ok(response)
    }
}

#[async_trait]
impl PaymentProvider for ScriptedProvider {
    type Request = Payment;
    type Response = Payment;
    type Adapter = PassThrough;

    fn name(&self) -> &str {
        self.name
    }

    async fn create_payment(&self, request: Payment) -> Result<Payment> {
        self.answer(request, "new")
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<Payment> {
        let payment = Payment {
            id: payment_id.to_string(),
            amount,
            ..Payment::default()
        };
        self.answer(payment, payment_id)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        let payment = Payment {
            id: payment_id.to_string(),
            ..Payment::default()
        };
        self.answer(payment, payment_id)
    }
}
