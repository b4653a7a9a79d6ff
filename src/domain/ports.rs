use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Bidirectional translation between the canonical payment and one backend's wire shapes.
///
/// Implemented by a zero-sized marker type per backend; the provider names its
/// adapter through [`PaymentProvider::Adapter`], so the pairing is fixed at compile time.
pub trait PaymentAdapter {
    type Request: Send;
    type Response: Send;

    /// Canonical payment -> backend create request.
    fn translate(payment: &Payment) -> Result<Self::Request>;

    /// Backend response -> canonical payment.
    fn adapt(response: Self::Response) -> Result<Payment>;
}

/// The operation set every payment backend exposes, in its own wire shapes.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    type Request: Send;
    type Response: Send;
    type Adapter: PaymentAdapter<Request = Self::Request, Response = Self::Response>;

    fn name(&self) -> &str;

    async fn create_payment(&self, request: Self::Request) -> Result<Self::Response>;
    async fn refund(&self, payment_id: &str, amount: Decimal) -> Result<Self::Response>;
    async fn get_payment(&self, payment_id: &str) -> Result<Self::Response>;
}

/// Provider-agnostic surface used by the payment service.
///
/// Every [`PaymentProvider`] gets this for free: the request goes through the
/// provider's adapter, the call is made, and the response is adapted back.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &str;
    async fn process_payment(&self, payment: &Payment) -> Result<Payment>;
    async fn refund_payment(&self, payment_id: &str, amount: Decimal) -> Result<Payment>;
    async fn retrieve_payment(&self, payment_id: &str) -> Result<Payment>;
}

#[async_trait]
impl<P> PaymentGateway for P
where
    P: PaymentProvider,
{
    fn name(&self) -> &str {
        PaymentProvider::name(self)
    }

    async fn process_payment(&self, payment: &Payment) -> Result<Payment> {
        let request = P::Adapter::translate(payment)?;
        let response = self.create_payment(request).await?;
        P::Adapter::adapt(response)
    }

    async fn refund_payment(&self, payment_id: &str, amount: Decimal) -> Result<Payment> {
        let response = self.refund(payment_id, amount).await?;
        P::Adapter::adapt(response)
    }

    async fn retrieve_payment(&self, payment_id: &str) -> Result<Payment> {
        let response = self.get_payment(payment_id).await?;
        P::Adapter::adapt(response)
    }
}

pub type GatewayBox = Box<dyn PaymentGateway>;
