use super::adapter::PaypalAdapter;
use super::{ChargeRequest, ChargeResponse, PROVIDER_NAME, RefundRequest};
use crate::domain::money::to_minor_units;
use crate::domain::ports::PaymentProvider;
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::HttpBackend;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use url::Url;

/// Talks to a remote PayPal-like backend over HTTP.
#[derive(Clone, Debug)]
pub struct PaypalClient {
    http: HttpBackend,
}

impl PaypalClient {
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
impl PaymentProvider for PaypalClient {
    type Request = ChargeRequest;
    type Response = ChargeResponse;
    type Adapter = PaypalAdapter;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn create_payment(&self, request: ChargeRequest) -> Result<ChargeResponse> {
        let url = self.http.endpoint(&["charges"])?;
        let charge: ChargeResponse = self.http.post_json(url, None, &request).await?;
        tracing::info!(provider = PROVIDER_NAME, payment_id = %charge.id, "charge created");
        Ok(charge)
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<ChargeResponse> {
        let amount = to_minor_units(amount).ok_or_else(|| {
            GatewayError::invalid_request(PROVIDER_NAME, format!("refund amount {amount} is out of range"))
        })?;
        let url = self.http.endpoint(&["refund", payment_id])?;
        let charge: ChargeResponse = self
            .http
            .post_json(url, Some(payment_id), &RefundRequest { amount })
            .await?;
        tracing::info!(provider = PROVIDER_NAME, payment_id, "charge refunded");
        Ok(charge)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<ChargeResponse> {
        let url = self.http.endpoint(&["charges", payment_id])?;
        self.http.get_json(url, Some(payment_id)).await
    }
}
