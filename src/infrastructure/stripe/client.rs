use super::adapter::StripeAdapter;
use super::{PROVIDER_NAME, TransactionRequest, TransactionResponse, VoidRequest};
use crate::domain::money::to_minor_units;
use crate::domain::ports::PaymentProvider;
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::HttpBackend;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use url::Url;

/// Talks to a remote Stripe-like backend over HTTP.
#[derive(Clone, Debug)]
pub struct StripeClient {
    http: HttpBackend,
}

impl StripeClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpBackend::new(PROVIDER_NAME, base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    type Request = TransactionRequest;
    type Response = TransactionResponse;
    type Adapter = StripeAdapter;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn create_payment(&self, request: TransactionRequest) -> Result<TransactionResponse> {
        let url = self.http.endpoint(&["transactions"])?;
        let transaction: TransactionResponse = self.http.post_json(url, None, &request).await?;
        tracing::info!(provider = PROVIDER_NAME, payment_id = %transaction.id, "transaction created");
        Ok(transaction)
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<TransactionResponse> {
        let amount = to_minor_units(amount).ok_or_else(|| {
            GatewayError::invalid_request(PROVIDER_NAME, format!("void amount {amount} is out of range"))
        })?;
        let url = self.http.endpoint(&["void", payment_id])?;
        let transaction: TransactionResponse = self
            .http
            .post_json(url, Some(payment_id), &VoidRequest { amount })
            .await?;
        tracing::info!(provider = PROVIDER_NAME, payment_id, "transaction voided");
        Ok(transaction)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<TransactionResponse> {
        let url = self.http.endpoint(&["transactions", payment_id])?;
        self.http.get_json(url, Some(payment_id)).await
    }
}
