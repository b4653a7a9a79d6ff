use super::adapter::StripeAdapter;
use super::{
    PROVIDER_NAME, STATUS_PAID, STATUS_VOIDED, TransactionRequest, TransactionResponse,
    VoidRequest,
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

/// An in-memory Stripe-like backend, usable in-process or behind [`StripeSandbox::router`].
#[derive(Clone, Default)]
pub struct StripeSandbox {
    transactions: InMemoryLedger<TransactionResponse>,
}

impl StripeSandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_transaction(&self, request: TransactionRequest) -> TransactionResponse {
        let transaction = TransactionResponse {
            id: Uuid::new_v4().to_string(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            status: STATUS_PAID.to_string(),
            amount: request.amount,
            original_amount: request.amount,
            currency: request.currency,
            statement_descriptor: request.statement_descriptor,
            description: request.description,
            payment_type: request.payment_type,
            card: request.card,
            card_id: Uuid::new_v4().to_string(),
        };
        self.transactions.insert(transaction).await
    }

    /// Subtracts `amount` minor units. Fails with `InvalidRequestShape` when the
    /// remaining amount would leave the `i64` range.
    pub async fn void_transaction(&self, id: &str, amount: i64) -> Result<TransactionResponse> {
        self.transactions
            .update(id, |transaction| -> Result<()> {
                let remaining = transaction.amount.checked_sub(amount).ok_or_else(|| {
                    GatewayError::invalid_request(
                        PROVIDER_NAME,
                        format!("void of {amount} would overflow the remaining amount"),
                    )
                })?;
                transaction.status = STATUS_VOIDED.to_string();
                transaction.amount = remaining;
                Ok(())
            })
            .await
            .unwrap_or_else(|| Err(GatewayError::not_found(PROVIDER_NAME, id)))
    }

    pub async fn transaction(&self, id: &str) -> Option<TransactionResponse> {
        self.transactions.get(id).await
    }

    /// HTTP surface: `POST /transactions`, `POST /void/{id}`, `GET /transactions/{id}`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/transactions", post(create_handler))
            .route("/void/{id}", post(void_handler))
            .route("/transactions/{id}", get(get_handler))
            .with_state(self)
    }
}

#[async_trait]
impl PaymentProvider for StripeSandbox {
    type Request = TransactionRequest;
    type Response = TransactionResponse;
    type Adapter = StripeAdapter;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn create_payment(&self, request: TransactionRequest) -> Result<TransactionResponse> {
        Ok(self.create_transaction(request).await)
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<TransactionResponse> {
        let amount = to_minor_units(amount).ok_or_else(|| {
            GatewayError::invalid_request(PROVIDER_NAME, format!("void amount {amount} is out of range"))
        })?;
        self.void_transaction(payment_id, amount).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<TransactionResponse> {
        self.transaction(payment_id)
            .await
            .ok_or_else(|| GatewayError::not_found(PROVIDER_NAME, payment_id))
    }
}

async fn create_handler(
    State(sandbox): State<StripeSandbox>,
    Json(request): Json<TransactionRequest>,
) -> Json<TransactionResponse> {
    let transaction = sandbox.create_transaction(request).await;
    tracing::info!(provider = PROVIDER_NAME, payment_id = %transaction.id, "sandbox transaction created");
    Json(transaction)
}

async fn void_handler(
    State(sandbox): State<StripeSandbox>,
    Path(id): Path<String>,
    Json(request): Json<VoidRequest>,
) -> std::result::Result<Json<TransactionResponse>, (StatusCode, &'static str)> {
    sandbox
        .void_transaction(&id, request.amount)
        .await
        .map(Json)
        .map_err(|err| match err {
            GatewayError::NotFound { .. } => (StatusCode::NOT_FOUND, "not found"),
            _ => (StatusCode::UNPROCESSABLE_ENTITY, "amount out of range"),
        })
}

async fn get_handler(
    State(sandbox): State<StripeSandbox>,
    Path(id): Path<String>,
) -> std::result::Result<Json<TransactionResponse>, (StatusCode, &'static str)> {
    sandbox
        .transaction(&id)
        .await
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(amount: i64) -> TransactionRequest {
        TransactionRequest {
            amount,
            currency: "USD".to_string(),
            statement_descriptor: "test".to_string(),
            payment_type: "card".to_string(),
            description: "test".to_string(),
            card: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_create_payment_is_paid() {
        let sandbox = StripeSandbox::new();
        let transaction = sandbox.create_payment(request(10_000)).await.unwrap();

        assert_eq!(transaction.status, "paid");
        assert!(Uuid::parse_str(&transaction.id).is_ok());
    }

    #[tokio::test]
    async fn test_refund_voids_and_subtracts() {
        let sandbox = StripeSandbox::new();
        let transaction = sandbox.create_payment(request(10_000)).await.unwrap();

        let voided = sandbox.refund(&transaction.id, dec!(50.0)).await.unwrap();
        assert_eq!(voided.status, "voided");
        assert_eq!(voided.amount, 5_000);
        assert_eq!(voided.original_amount, 10_000);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let sandbox = StripeSandbox::new();
        assert!(matches!(
            sandbox.refund("invalid-id", dec!(50.0)).await,
            Err(GatewayError::NotFound { .. })
        ));
        assert!(matches!(
            sandbox.get_payment("invalid-id").await,
            Err(GatewayError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_overflowing_refund_is_rejected_and_leaves_record() {
        let sandbox = StripeSandbox::new();
        let created = sandbox.create_payment(request(0)).await.unwrap();
        let huge = Decimal::new(i64::MAX, 2);

        let first = sandbox.refund(&created.id, huge).await.unwrap();
        assert_eq!(first.amount, -i64::MAX);

        let err = sandbox.refund(&created.id, huge).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequestShape { .. }));
        let stored = sandbox.get_payment(&created.id).await.unwrap();
        assert_eq!(stored.amount, -i64::MAX);
    }

    #[tokio::test]
    async fn test_router_answers_overflowing_refund_with_client_error() {
        use crate::infrastructure::stripe::client::StripeClient;

        let sandbox = StripeSandbox::new();
        let created = sandbox.create_payment(request(0)).await.unwrap();
        sandbox.void_transaction(&created.id, i64::MAX).await.unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = sandbox.router();
        tokio::spawn(async move { axum::serve(listener, router).await });

        let client = StripeClient::new(
            format!("http://{addr}").parse().unwrap(),
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let err = client
            .refund(&created.id, Decimal::new(i64::MAX, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::BackendError { ref reason, .. } if reason.contains("422")));
    }
}
