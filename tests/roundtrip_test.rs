mod common;

use common::sample_payment;
use paygate::domain::ports::PaymentAdapter;
use paygate::infrastructure::paypal::adapter::PaypalAdapter;
use paygate::infrastructure::paypal::sandbox::PaypalSandbox;
use paygate::infrastructure::stripe::adapter::StripeAdapter;
use paygate::infrastructure::stripe::sandbox::StripeSandbox;
use rand::Rng;
use rust_decimal::Decimal;

fn random_amounts(count: usize) -> Vec<Decimal> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Decimal::new(rng.gen_range(0..10_000_000), 2))
        .collect()
}

#[tokio::test]
async fn test_paypal_preserves_amount_currency_and_description() {
    let sandbox = PaypalSandbox::new();
    for amount in random_amounts(200) {
        let payment = sample_payment(amount);
        let request = PaypalAdapter::translate(&payment).unwrap();
        let charge = sandbox.create_charge(request).await;
        let adapted = PaypalAdapter::adapt(charge).unwrap();

        assert_eq!(adapted.amount, amount);
        assert_eq!(adapted.currency, payment.currency);
        assert_eq!(adapted.description, payment.description);
        assert_eq!(adapted.method.card, payment.method.card);
    }
}

#[tokio::test]
async fn test_stripe_preserves_amount_currency_and_description() {
    let sandbox = StripeSandbox::new();
    for amount in random_amounts(200) {
        let payment = sample_payment(amount);
        let request = StripeAdapter::translate(&payment).unwrap();
        let transaction = sandbox.create_transaction(request).await;
        let adapted = StripeAdapter::adapt(transaction).unwrap();

        assert_eq!(adapted.amount, amount);
        assert_eq!(adapted.currency, payment.currency);
        assert_eq!(adapted.description, payment.description);
        assert_eq!(adapted.method.card, payment.method.card);
    }
}
