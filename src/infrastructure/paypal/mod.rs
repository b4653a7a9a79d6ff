//! PayPal-like backend: wire shapes, adapter, HTTP client and in-memory sandbox.
//!
//! Amounts travel in minor units. A charge keeps both the amount it was
//! created with (`originalAmount`) and what remains after refunds
//! (`currentAmount`).

pub mod adapter;
pub mod client;
pub mod sandbox;

use crate::infrastructure::ledger::LedgerRecord;
use serde::{Deserialize, Serialize};

pub const PROVIDER_NAME: &str = "paypal";
pub const STATUS_AUTHORIZED: &str = "authorized";
pub const STATUS_REFUNDED: &str = "refunded";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalCard {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub holder_name: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub expiration_date: String,
    #[serde(default)]
    pub installments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub card: PaypalCard,
}

/// `POST /charges` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// `POST /refund/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    pub amount: i64,
}

/// Every PayPal endpoint answers with a charge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeResponse {
    pub id: String,
    pub created_at: String,
    pub status: String,
    pub original_amount: i64,
    pub current_amount: i64,
    pub currency: String,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub card_id: String,
}

impl LedgerRecord for ChargeResponse {
    fn id(&self) -> &str {
        &self.id
    }
}
