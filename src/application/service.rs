use crate::domain::payment::Payment;
use crate::domain::ports::{GatewayBox, PaymentGateway};
use crate::error::{GatewayError, Operation, ProviderSlot, Result};
use rust_decimal::Decimal;
use std::future::Future;
use std::pin::Pin;

type Attempt<'a> = Pin<Box<dyn Future<Output = Result<Payment>> + Send + 'a>>;

/// Entry point for every payment operation.
///
/// `PaymentService` owns a primary and a secondary provider handle. Each
/// operation is tried against the primary first; on any failure the same
/// operation is tried against the secondary. Only when both fail does the
/// caller see an error, and that error names both failures.
///
/// The service keeps no state of its own and never runs the two attempts
/// concurrently, so it can be shared freely between request handlers.
pub struct PaymentService {
    primary: Option<GatewayBox>,
    secondary: Option<GatewayBox>,
}

impl PaymentService {
    /// Creates a service with both slots bound.
    pub fn new(primary: GatewayBox, secondary: GatewayBox) -> Self {
        Self::with_slots(Some(primary), Some(secondary))
    }

    /// Creates a service where either slot may be left unbound.
    ///
    /// An unbound slot fails with [`GatewayError::ProviderUnavailable`] without
    /// touching the other provider.
    pub fn with_slots(primary: Option<GatewayBox>, secondary: Option<GatewayBox>) -> Self {
        Self { primary, secondary }
    }

    /// Name of the provider bound to `slot`, if any.
    pub fn provider_name(&self, slot: ProviderSlot) -> Option<&str> {
        self.gateway(slot).map(|gateway| gateway.name())
    }

    /// Creates a payment, returning the backend's view of it.
    pub async fn process_payment(&self, payment: &Payment) -> Result<Payment> {
        self.failover(Operation::Create, |gateway| gateway.process_payment(payment))
            .await
    }

    /// Refunds `amount` from the payment identified by `payment_id`.
    ///
    /// The amount is passed through as-is; backends decide what an
    /// over-refund means.
    pub async fn refund_payment(&self, payment_id: &str, amount: Decimal) -> Result<Payment> {
        self.failover(Operation::Refund, |gateway| {
            gateway.refund_payment(payment_id, amount)
        })
        .await
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        self.failover(Operation::Get, |gateway| gateway.retrieve_payment(payment_id))
            .await
    }

    async fn failover<'a, F>(&'a self, operation: Operation, call: F) -> Result<Payment>
    where
        F: Fn(&'a dyn PaymentGateway) -> Attempt<'a> + Sync,
    {
        let primary_error = match self.attempt(ProviderSlot::Primary, &call).await {
            Ok(payment) => return Ok(payment),
            Err(err) => err,
        };
        tracing::warn!(
            %operation,
            provider = self.provider_name(ProviderSlot::Primary).unwrap_or("none"),
            error = %primary_error,
            "primary provider failed, trying secondary"
        );

        match self.attempt(ProviderSlot::Secondary, &call).await {
            Ok(payment) => {
                // The caller only sees the secondary's result; this event is the
                // one place the primary failure remains visible.
                tracing::warn!(
                    %operation,
                    degraded = true,
                    failed_provider = self.provider_name(ProviderSlot::Primary).unwrap_or("none"),
                    served_by = self.provider_name(ProviderSlot::Secondary).unwrap_or("none"),
                    primary_error = %primary_error,
                    payment_id = %payment.id,
                    "secondary provider served the request after primary failure"
                );
                Ok(payment)
            }
            Err(secondary_error) => {
                tracing::error!(
                    %operation,
                    primary_error = %primary_error,
                    secondary_error = %secondary_error,
                    "both providers failed"
                );
                Err(GatewayError::BothProvidersFailed {
                    operation,
                    primary: Box::new(primary_error),
                    secondary: Box::new(secondary_error),
                })
            }
        }
    }

    async fn attempt<'a, F>(&'a self, slot: ProviderSlot, call: &F) -> Result<Payment>
    where
        F: Fn(&'a dyn PaymentGateway) -> Attempt<'a> + Sync,
    {
        let gateway = self
            .gateway(slot)
            .ok_or(GatewayError::ProviderUnavailable { slot })?;
        tracing::debug!(%slot, provider = gateway.name(), "calling provider");
        call(gateway).await
    }

    fn gateway(&self, slot: ProviderSlot) -> Option<&dyn PaymentGateway> {
        match slot {
            ProviderSlot::Primary => self.primary.as_deref(),
            ProviderSlot::Secondary => self.secondary.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Card, Method};
    use crate::infrastructure::paypal::sandbox::PaypalSandbox;
    use crate::infrastructure::stripe::sandbox::StripeSandbox;
    use rust_decimal_macros::dec;

    fn payment(amount: Decimal) -> Payment {
        Payment::new(
            amount,
            "USD",
            "test order",
            Method::card(Card::new("4111111111111111", "John Doe", "123", "12/2025", 1)),
        )
    }

    #[tokio::test]
    async fn test_primary_success_leaves_secondary_untouched() {
        let stripe = StripeSandbox::new();
        let service = PaymentService::new(Box::new(PaypalSandbox::new()), Box::new(stripe.clone()));

        let created = service.process_payment(&payment(dec!(100.0))).await.unwrap();

        assert_eq!(created.status, "authorized");
        assert!(stripe.transaction(&created.id).await.is_none());
    }

    #[tokio::test]
    async fn test_unbound_primary_falls_back_to_secondary() {
        let service = PaymentService::with_slots(None, Some(Box::new(StripeSandbox::new())));

        let created = service.process_payment(&payment(dec!(10.0))).await.unwrap();
        assert_eq!(created.status, "paid");
        assert_eq!(created.amount, dec!(10.0));
    }

    #[tokio::test]
    async fn test_refund_falls_back_when_primary_does_not_know_payment() {
        let stripe = StripeSandbox::new();
        let secondary_only = PaymentService::with_slots(None, Some(Box::new(stripe.clone())));
        let created = secondary_only.process_payment(&payment(dec!(80.0))).await.unwrap();

        let service = PaymentService::new(Box::new(PaypalSandbox::new()), Box::new(stripe));
        let refunded = service.refund_payment(&created.id, dec!(30.0)).await.unwrap();

        assert_eq!(refunded.status, "voided");
        assert_eq!(refunded.amount, dec!(50.0));
    }

    #[tokio::test]
    async fn test_both_unbound_slots_fail_without_calls() {
        let service = PaymentService::with_slots(None, None);

        let err = service.get_payment("anything").await.unwrap_err();
        match err {
            GatewayError::BothProvidersFailed {
                operation,
                primary,
                secondary,
            } => {
                assert_eq!(operation, Operation::Get);
                assert!(matches!(
                    *primary,
                    GatewayError::ProviderUnavailable { slot: ProviderSlot::Primary }
                ));
                assert!(matches!(
                    *secondary,
                    GatewayError::ProviderUnavailable { slot: ProviderSlot::Secondary }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_names() {
        let service = PaymentService::with_slots(Some(Box::new(PaypalSandbox::new())), None);
        assert_eq!(service.provider_name(ProviderSlot::Primary), Some("paypal"));
        assert_eq!(service.provider_name(ProviderSlot::Secondary), None);
    }
}
