use super::{ChargeRequest, ChargeResponse, PROVIDER_NAME, PaymentMethod, PaypalCard};
use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::payment::{Card, Method, Payment};
use crate::domain::ports::PaymentAdapter;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;

/// Maps canonical payments onto PayPal charges and back.
#[derive(Debug, Clone, Copy)]
pub struct PaypalAdapter;

impl PaymentAdapter for PaypalAdapter {
    type Request = ChargeRequest;
    type Response = ChargeResponse;

    fn translate(payment: &Payment) -> Result<ChargeRequest> {
        if !payment.method.is_card() {
            return Err(GatewayError::invalid_request(
                PROVIDER_NAME,
                format!("unsupported payment method '{}'", payment.method.kind),
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
        Ok(ChargeRequest {
            amount,
            currency: payment.currency.clone(),
            description: payment.description.clone(),
            payment_method: PaymentMethod {
                kind: payment.method.kind.clone(),
                card: PaypalCard {
                    number: card.number.clone(),
                    holder_name: card.holder.clone(),
                    cvv: card.cvv.clone(),
                    expiration_date: card.expiration.clone(),
                    installments: card.installment_number,
                },
            },
        })
    }

    fn adapt(response: ChargeResponse) -> Result<Payment> {
        if response.id.is_empty() {
            return Err(GatewayError::unsupported_response(
                PROVIDER_NAME,
                "charge has no id",
            ));
        }
        if response.status.is_empty() {
            return Err(GatewayError::unsupported_response(
                PROVIDER_NAME,
                format!("charge {} has no status", response.id),
            ));
        }

        let method = response.payment_method;
        Ok(Payment {
            id: response.id,
            amount: from_minor_units(response.current_amount),
            currency: response.currency,
            description: response.description,
            status: response.status,
            created_at: response.created_at,
            card_id: Some(response.card_id).filter(|id| !id.is_empty()),
            method: Method {
                kind: method.kind,
                card: Card {
                    number: method.card.number,
                    holder: method.card.holder_name,
                    cvv: method.card.cvv,
                    expiration: method.card.expiration_date,
                    installment_number: method.card.installments,
                },
            },
        })
    }
}
