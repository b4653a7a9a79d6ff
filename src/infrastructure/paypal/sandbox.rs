use super::adapter::PaypalAdapter;
use super::{
    ChargeRequest, ChargeResponse, PROVIDER_NAME, RefundRequest, STATUS_AUTHORIZED,
    STATUS_REFUNDED,
};
use crate::domain::money::to_minor_units;
use crate::domain::ports::PaymentProvider;
use crate::error::{GatewayError, Result};
use crate::infrastructure::ledger::InMemoryLedger;
use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use uuid::Uuid;

/// An in-memory PayPal-like backend.
///
/// Serves as an in-process provider and, through [`PaypalSandbox::router`], as
/// the mock server the HTTP client talks to.
#[derive(Clone, Default)]
pub struct PaypalSandbox {
    charges: InMemoryLedger<ChargeResponse>,
}

impl PaypalSandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_charge(&self, request: ChargeRequest) -> ChargeResponse {
        let charge = ChargeResponse {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            status: STATUS_AUTHORIZED.to_string(),
            original_amount: request.amount,
            current_amount: request.amount,
            currency: request.currency,
            description: request.description,
            payment_method: request.payment_method,
            card_id: Uuid::new_v4().to_string(),
        };
        self.charges.insert(charge).await
    }

    /// Subtracts `amount` minor units. Fails with `InvalidRequestShape` when the
    /// remaining amount would leave the `i64` range.
    pub async fn refund_charge(&self, id: &str, amount: i64) -> Result<ChargeResponse> {
        self.charges
            .update(id, |charge| -> Result<()> {
                let remaining = charge.current_amount.checked_sub(amount).ok_or_else(|| {
                    GatewayError::invalid_request(
                        PROVIDER_NAME,
                        format!("refund of {amount} would overflow the remaining amount"),
                    )
                })?;
                charge.status = STATUS_REFUNDED.to_string();
                charge.current_amount = remaining;
                Ok(())
            })
            .await
            .unwrap_or_else(|| Err(GatewayError::not_found(PROVIDER_NAME, id)))
    }

    pub async fn charge(&self, id: &str) -> Option<ChargeResponse> {
        self.charges.get(id).await
    }

    /// HTTP surface: `POST /charges`, `POST /refund/{id}`, `GET /charges/{id}`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/charges", post(create_handler))
            .route("/refund/{id}", post(refund_handler))
            .route("/charges/{id}", get(get_handler))
            .with_state(self)
    }
}

#[async_trait]
impl PaymentProvider for PaypalSandbox {
    type Request = ChargeRequest;
    type Response = ChargeResponse;
    type Adapter = PaypalAdapter;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn create_payment(&self, request: ChargeRequest) -> Result<ChargeResponse> {
        Ok(self.create_charge(request).await)
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<ChargeResponse> {
        let amount = to_minor_units(amount).ok_or_else(|| {
            GatewayError::invalid_request(PROVIDER_NAME, format!("refund amount {amount} is out of range"))
        })?;
        self.refund_charge(payment_id, amount).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<ChargeResponse> {
        self.charge(payment_id)
            .await
            .ok_or_else(|| GatewayError::not_found(PROVIDER_NAME, payment_id))
    }
}

async fn create_handler(
    State(sandbox): State<PaypalSandbox>,
    Json(request): Json<ChargeRequest>,
) -> Json<ChargeResponse> {
    let charge = sandbox.create_charge(request).await;
    tracing::info!(provider = PROVIDER_NAME, payment_id = %charge.id, "sandbox charge created");
    Json(charge)
}

async fn refund_handler(
    State(sandbox): State<PaypalSandbox>,
    Path(id): Path<String>,
    Json(request): Json<RefundRequest>,
) -> std::result::Result<Json<ChargeResponse>, (StatusCode, &'static str)> {
    sandbox
        .refund_charge(&id, request.amount)
        .await
        .map(Json)
        .map_err(|err| match err {
            GatewayError::NotFound { .. } => (StatusCode::NOT_FOUND, "not found"),
            _ => (StatusCode::UNPROCESSABLE_ENTITY, "amount out of range"),
        })
}

async fn get_handler(
    State(sandbox): State<PaypalSandbox>,
    Path(id): Path<String>,
) -> std::result::Result<Json<ChargeResponse>, (StatusCode, &'static str)> {
    sandbox
        .charge(&id)
        .await
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "not found"))
}
