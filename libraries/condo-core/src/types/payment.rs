/// Payment domain type
use crate::currency::convert_to_usd;
use crate::error::{Result, ValidationError};
use crate::ident;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method recorded on every submission. Bank transfer is the only
/// channel the condominium accepts.
pub const DEFAULT_METHOD: &str = "transfer";

/// Classification of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Regular monthly fee
    #[default]
    Ordinary,
    /// One-off fee; requires a free-text reason
    Extraordinary,
}

/// A recorded payment. Immutable after creation; deletable only by an
/// administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Client-generated time-based token, unique within a session
    pub id: String,

    /// Reference to an existing house
    pub house_id: String,

    /// Normalized amount in USD
    pub amount: f64,

    /// Original amount in Bs.
    pub amount_bs: f64,

    /// Exchange rate used for normalization
    pub exchange_rate: f64,

    /// Normalized amount in USD (kept alongside `amount` per the stored
    /// blob schema)
    pub total_usd: f64,

    /// Ordinary or extraordinary
    pub payment_type: PaymentType,

    /// Required when the payment is extraordinary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraordinary_reason: Option<String>,

    /// Payment channel
    pub method: String,

    /// 6-digit bank reference code
    pub bank_reference: String,

    /// Issue date
    pub date: DateTime<Utc>,

    /// Opaque receipt reference from the blob-storage collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_ref: Option<String>,
}

/// Checks a bank reference: exactly 6 ASCII digits.
pub fn is_valid_bank_reference(reference: &str) -> bool {
    reference.len() == 6 && reference.bytes().all(|b| b.is_ascii_digit())
}

/// Form input for a new payment, validated by [`PaymentDraft::build`].
#[derive(Debug, Clone, Default)]
pub struct PaymentDraft {
    pub house_id: String,
    pub amount_bs: Option<f64>,
    pub exchange_rate: Option<f64>,
    pub payment_type: PaymentType,
    pub extraordinary_reason: Option<String>,
    pub bank_reference: String,
    pub receipt_ref: Option<String>,
}

impl PaymentDraft {
    /// Validate the draft and build the payment record.
    ///
    /// The house reference is checked for shape only; existence against the
    /// current snapshot is the caller's responsibility.
    pub fn build(self) -> Result<Payment> {
        // Stored as trimmed so the record matches the house id that was
        // validated against the snapshot
        let house_id = self.house_id.trim();
        if house_id.is_empty() {
            return Err(ValidationError::MissingHouse);
        }
        if !is_valid_bank_reference(&self.bank_reference) {
            return Err(ValidationError::InvalidBankReference);
        }
        let amount_bs = self
            .amount_bs
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or(ValidationError::InvalidAmount)?;
        let exchange_rate = self
            .exchange_rate
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or(ValidationError::InvalidExchangeRate)?;
        let extraordinary_reason = match self.payment_type {
            PaymentType::Extraordinary => Some(
                self.extraordinary_reason
                    .filter(|r| !r.trim().is_empty())
                    .ok_or(ValidationError::MissingExtraordinaryReason)?,
            ),
            PaymentType::Ordinary => None,
        };

        let total_usd = convert_to_usd(Some(amount_bs), Some(exchange_rate));

        Ok(Payment {
            id: ident::next_token(),
            house_id: house_id.to_string(),
            amount: total_usd,
            amount_bs,
            exchange_rate,
            total_usd,
            payment_type: self.payment_type,
            extraordinary_reason,
            method: DEFAULT_METHOD.to_string(),
            bank_reference: self.bank_reference,
            date: Utc::now(),
            receipt_ref: self.receipt_ref,
        })
    }
}
