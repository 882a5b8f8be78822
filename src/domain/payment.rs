use crate::domain::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Currency code attached to every payment for display. The ledger does
/// no conversion.
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Failed,
    Refunded,
}

/// A recorded payment against an event. Immutable once created.
///
/// Settlement is mocked: there is no gateway round-trip, so a payment
/// that passes ledger admission is created directly in the Paid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u32,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub method: String,
    pub transaction_id: String,
    pub receipt_number: String,
    pub currency: String,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Builds a settled (Paid) payment with generated identifiers.
    pub fn settled(id: u32, amount: Amount, method: &str, seq: &ReceiptSequence) -> Self {
        let now = Utc::now();
        let (transaction_id, receipt_number) = seq.next_ids(now);
        Self {
            id,
            amount,
            status: PaymentStatus::Paid,
            method: method.to_string(),
            transaction_id,
            receipt_number,
            currency: DEFAULT_CURRENCY.to_string(),
            paid_at: now,
        }
    }
}

/// Process-wide monotonic sequence backing transaction and receipt
/// identifiers. The timestamp alone is not unique under rapid successive
/// payments; the counter suffix makes it so.
#[derive(Debug, Default)]
pub struct ReceiptSequence(AtomicU64);

impl ReceiptSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ids(&self, now: DateTime<Utc>) -> (String, String) {
        let seq = self.0.fetch_add(1, Ordering::Relaxed);
        let ts = now.timestamp();
        (format!("TXN{ts}-{seq:06}"), format!("RCP{ts}-{seq:06}"))
    }
}
