use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The only payment method type the backends understand.
pub const CARD_METHOD: &str = "card";

/// Provider-neutral representation of a payment.
///
/// A caller builds one with an empty `id` and `status`; only a provider adapter
/// ever fills those in. Results coming back from the service are fresh values,
/// never the caller's payment mutated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend-assigned identifier, empty until creation succeeds.
    #[serde(default)]
    pub id: String,
    /// Amount in major currency units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    /// Backend-defined status string ("authorized", "paid", "refunded", "voided", ...).
    #[serde(default)]
    pub status: String,
    /// Backend-supplied creation timestamp, kept opaque.
    #[serde(default)]
    pub created_at: String,
    /// Backend-assigned card token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default)]
    pub method: Method,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Method {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub card: Card,
}

/// Card details. Pass-through data: nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub number: String,
    pub holder: String,
    pub cvv: String,
    pub expiration: String,
    pub installment_number: u32,
}

impl Payment {
    pub fn new(amount: Decimal, currency: &str, description: &str, method: Method) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
            description: description.to_string(),
            method,
            ..Self::default()
        }
    }
}

impl Method {
    pub fn new(kind: &str, card: Card) -> Self {
        Self {
            kind: kind.to_string(),
            card,
        }
    }

    pub fn card(card: Card) -> Self {
        Self::new(CARD_METHOD, card)
    }

    pub fn is_card(&self) -> bool {
        self.kind == CARD_METHOD
    }
}

impl Card {
    pub fn new(
        number: &str,
        holder: &str,
        cvv: &str,
        expiration: &str,
        installment_number: u32,
    ) -> Self {
        Self {
            number: number.to_string(),
            holder: holder.to_string(),
            cvv: cvv.to_string(),
            expiration: expiration.to_string(),
            installment_number,
        }
    }
}
