//! Wire types for the Connect API.
//!
//! Field names are snake_case: incoming bodies have already been through the
//! inbound key-casing transform by the time they are deserialized, and
//! outgoing bodies are camelized after serialization, so these structs never
//! see the wire convention.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The public half of a user profile, visible to anyone who knows the handle.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PublicProfile {
    /// Stable user identifier.
    pub id: String,
    /// The user's payment handle.
    pub handle: String,
    /// Display name chosen by the user.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// The user's preferred fiat currency code.
    #[serde(default)]
    pub local_currency_code: Option<String>,
}

/// The private half of a user profile, only returned for the authenticated
/// user and only when the app holds the matching permission.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrivateProfile {
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    /// Public profile half.
    pub public_profile: PublicProfile,
    /// Private profile half; absent without the profile permission.
    #[serde(default)]
    pub private_profile: Option<PrivateProfile>,
}

/// Spendable balance of the authenticated user's wallet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpendableBalance {
    /// Balance in satoshis.
    pub spendable_satoshi_balance: u64,
    /// Balance converted to the requested fiat currency.
    pub spendable_fiat_balance: f64,
    /// Currency code of the fiat conversion.
    pub currency_code: String,
}

/// A fiat exchange rate quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeRate {
    /// Symbol of the fiat currency the rate converts to.
    pub fiat_symbol: String,
    /// Units of fiat per coin.
    pub rate: f64,
    /// Identifier of this rate quote; payments may pin it.
    pub exchange_rate_version_id: String,
    /// When this quote stops being valid, ISO-8601.
    pub estimated_expire_date: String,
}

/// A counterparty of a settled payment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentParticipant {
    /// Participant kind, e.g. `user`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Handle or address of the participant.
    pub alias: String,
    /// Display name at the time of payment.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar URL at the time of payment.
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// A settled payment, as returned by payment lookup and payment execution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentResult {
    /// On-chain transaction id.
    pub transaction_id: String,
    /// Free-form note attached by the payer.
    #[serde(default)]
    pub note: Option<String>,
    /// Application-defined action tag.
    #[serde(default)]
    pub app_action: Option<String>,
    /// Unix timestamp of the payment.
    pub time: u64,
    /// Total amount moved, in satoshis.
    pub satoshi_amount: u64,
    /// Network fees paid, in satoshis.
    pub satoshi_fees: u64,
    /// Exchange rate applied for fiat-denominated sends.
    #[serde(default)]
    pub fiat_exchange_rate: Option<f64>,
    /// Currency code of the fiat denomination.
    #[serde(default)]
    pub fiat_currency_code: Option<String>,
    /// All counterparties of the payment.
    #[serde(default)]
    pub participants: Vec<PaymentParticipant>,
    /// Attachments carried by the payment, verbatim.
    #[serde(default)]
    pub attachments: Vec<Value>,
}

/// A single receiver of an outgoing payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequestItem {
    /// Destination handle or address.
    pub destination: String,
    /// Currency the amount is denominated in.
    pub currency_code: String,
    /// Amount to send, in `currency_code` units.
    pub send_amount: f64,
}

/// A data attachment to include with a payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    /// Attachment format, e.g. `json` or `hex`.
    pub format: String,
    /// Attachment payload.
    pub value: Value,
}

/// Parameters for executing a payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentParams {
    /// Human-readable description shown to the payer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Application-defined action tag.
    pub app_action: String,
    /// One entry per receiver. Renamed to `receivers` on the wire.
    pub payments: Vec<PaymentRequestItem>,
    /// Optional data attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// Format of the payload passed to the data-signing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Plain UTF-8 text.
    Utf8,
    /// Hex-encoded bytes.
    Hex,
    /// Base64-encoded bytes.
    Base64,
}

impl DataFormat {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Utf8 => "utf-8",
            DataFormat::Hex => "hex",
            DataFormat::Base64 => "base64",
        }
    }
}
