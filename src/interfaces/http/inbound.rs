use super::error::ApiError;
use crate::domain::money::max_exact_amount;
use crate::domain::payment::{CARD_METHOD, Card, Method, Payment};
use rust_decimal::Decimal;
use serde::Deserialize;

/// `POST /payments` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub method: MethodRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodRequest {
    #[serde(rename = "type", default = "default_method")]
    pub kind: String,
    #[serde(default)]
    pub card: CardRequest,
}

impl Default for MethodRequest {
    fn default() -> Self {
        Self {
            kind: default_method(),
            card: CardRequest::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRequest {
    pub number: String,
    pub holder: String,
    pub cvv: String,
    pub expiration: String,
    pub installment_number: u32,
}

fn default_method() -> String {
    CARD_METHOD.to_string()
}

/// Rejects amounts that are negative or too large to travel as a JSON number.
fn checked_amount(amount: Decimal) -> Result<Decimal, ApiError> {
    if amount < Decimal::ZERO {
        return Err(ApiError::bad_request(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    if amount > max_exact_amount() {
        return Err(ApiError::bad_request(format!(
            "amount {amount} exceeds the maximum of {}",
            max_exact_amount()
        )));
    }
    Ok(amount)
}

impl TryFrom<CreatePaymentRequest> for Payment {
    type Error = ApiError;

    fn try_from(request: CreatePaymentRequest) -> Result<Self, ApiError> {
        let amount = checked_amount(request.amount)?;
        let card = request.method.card;
        Ok(Payment::new(
            amount,
            &request.currency,
            &request.description,
            Method {
                kind: request.method.kind,
                card: Card {
                    number: card.number,
                    holder: card.holder,
                    cvv: card.cvv,
                    expiration: card.expiration,
                    installment_number: card.installment_number,
                },
            },
        ))
    }
}

/// `POST /refunds` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RefundRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl RefundRequest {
    pub fn checked_amount(&self) -> Result<Decimal, ApiError> {
        checked_amount(self.amount)
    }
}

/// `?id=` on `POST /refunds`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefundQuery {
    #[serde(default)]
    pub id: Option<String>,
}
