//! Stripe-like backend: wire shapes, adapter, HTTP client and in-memory sandbox.
//!
//! Transactions carry a single running `amount` in minor units plus the
//! `originalAmount` they were created with. Refunds are called voids here.

pub mod adapter;
pub mod client;
pub mod sandbox;

use crate::infrastructure::ledger::LedgerRecord;
use serde::{Deserialize, Serialize};

pub const PROVIDER_NAME: &str = "stripe";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_VOIDED: &str = "voided";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeCard {
    pub number: String,
    pub holder: String,
    pub cvv: String,
    pub expiration: String,
    pub installment_number: u32,
}

/// `POST /transactions` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub statement_descriptor: String,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub card: StripeCard,
}

/// `POST /void/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidRequest {
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionResponse {
    pub id: String,
    /// Creation date.
    pub date: String,
    pub status: String,
    pub amount: i64,
    pub original_amount: i64,
    pub currency: String,
    pub statement_descriptor: String,
    pub description: String,
    pub payment_type: String,
    pub card: StripeCard,
    pub card_id: String,
}

impl LedgerRecord for TransactionResponse {
    fn id(&self) -> &str {
        &self.id
    }
}
