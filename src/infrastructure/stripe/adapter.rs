use super::{PROVIDER_NAME, StripeCard, TransactionRequest, TransactionResponse};
use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::payment::{Card, Method, Payment};
use crate::domain::ports::PaymentAdapter;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;

/// Maps canonical payments onto Stripe transactions and back.
#[derive(Debug, Clone, Copy)]
pub struct StripeAdapter;

impl PaymentAdapter for StripeAdapter {
    type Request = TransactionRequest;
    type Response = TransactionResponse;

    fn translate(payment: &Payment) -> Result<TransactionRequest> {
        if !payment.method.is_card() {
            return Err(GatewayError::invalid_request(
                PROVIDER_NAME,
                format!("unsupported payment type '{}'", payment.method.kind),
            ));
        }
        if payment.amount < Decimal::ZERO {
            return Err(GatewayError::invalid_request(
                PROVIDER_NAME,
                format!("amount must not be negative, got {}", payment.amount),
            ));
        }
        let amount = to_minor_units(payment.amount).ok_or_else(|| {
            GatewayError::invalid_request(
                PROVIDER_NAME,
                format!("amount {} is out of range", payment.amount),
            )
        })?;

        let card = &payment.method.card;
        Ok(TransactionRequest {
            amount,
            currency: payment.currency.clone(),
            statement_descriptor: payment.description.clone(),
            payment_type: payment.method.kind.clone(),
            description: payment.description.clone(),
            card: StripeCard {
                number: card.number.clone(),
                holder: card.holder.clone(),
                cvv: card.cvv.clone(),
                expiration: card.expiration.clone(),
                installment_number: card.installment_number,
            },
        })
    }

    fn adapt(response: TransactionResponse) -> Result<Payment> {
        if response.id.is_empty() || response.status.is_empty() {
            return Err(GatewayError::unsupported_response(
                PROVIDER_NAME,
                format!(
                    "transaction is missing its id or status (id='{}', status='{}')",
                    response.id, response.status
                ),
            ));
        }

        // Older transactions only carry the statement descriptor.
        let description = if response.description.is_empty() {
            response.statement_descriptor
        } else {
            response.description
        };

        Ok(Payment {
            id: response.id,
            amount: from_minor_units(response.amount),
            currency: response.currency,
            description,
            status: response.status,
            created_at: response.date,
            card_id: Some(response.card_id).filter(|id| !id.is_empty()),
            method: Method {
                kind: response.payment_type,
                card: Card {
                    number: response.card.number,
                    holder: response.card.holder,
                    cvv: response.card.cvv,
                    expiration: response.card.expiration,
                    installment_number: response.card.installment_number,
                },
            },
        })
    }
}
