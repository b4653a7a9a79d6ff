use super::error::{ApiError, ApiResult};
use super::inbound::{CreatePaymentRequest, RefundQuery, RefundRequest};
use crate::application::service::PaymentService;
use crate::domain::payment::Payment;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builds the public router. `request_timeout` bounds each inbound request as a whole.
pub fn router(service: Arc<PaymentService>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/payments", post(create_payment))
        .route("/payments/{id}", get(get_payment))
        .route("/refunds", post(refund_payment))
        .with_state(service)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn create_payment(
    State(service): State<Arc<PaymentService>>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> ApiResult<Json<Payment>> {
    let Json(request) = payload?;
    let payment = Payment::try_from(request)?;
    let payment = service.process_payment(&payment).await?;
    Ok(Json(payment))
}

async fn refund_payment(
    State(service): State<Arc<PaymentService>>,
    query: Result<Query<RefundQuery>, QueryRejection>,
    payload: Result<Json<RefundRequest>, JsonRejection>,
) -> ApiResult<Json<Payment>> {
    let Query(query) = query?;
    let payment_id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("query parameter 'id' is required"))?;
    let Json(request) = payload?;
    let amount = request.checked_amount()?;

    let payment = service.refund_payment(&payment_id, amount).await?;
    Ok(Json(payment))
}

async fn get_payment(
    State(service): State<Arc<PaymentService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let payment = service.get_payment(&id).await?;
    Ok(Json(payment))
}
