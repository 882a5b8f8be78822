//! The payment ledger: read-derivations over an event's payments and the
//! admission rule for recording a new one.

use crate::domain::event::{Event, EventStatus};
use crate::domain::money::{Amount, Balance};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sum of Paid payments. Pending, Partial, Failed, and Refunded rows do
/// not count toward settlement.
pub fn total_paid(payments: &[Payment]) -> Balance {
    payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .fold(Balance::ZERO, |acc, p| acc + p.amount.into())
}

/// Amount still owed, clamped at zero so overpayment reads as "nothing
/// more owed" rather than a negative debt.
pub fn remaining_balance(total_cost: Balance, payments: &[Payment]) -> Balance {
    total_cost.saturating_sub(total_paid(payments))
}

/// Validates a payment attempt against the ledger. Returns the admitted
/// amount; nothing is persisted on rejection.
pub fn admit_payment(total_cost: Balance, payments: &[Payment], amount: Decimal) -> Result<Amount> {
    let amount = Amount::new(amount)?;
    let remaining = remaining_balance(total_cost, payments);
    if Balance::from(amount) > remaining {
        return Err(BookingError::validation(format!(
            "Payment amount exceeds remaining balance ({remaining})"
        )));
    }
    Ok(amount)
}

/// Per-event reconciliation row rendered to clients and admins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStatement {
    pub event: u32,
    pub status: EventStatus,
    pub total_cost: Balance,
    pub total_paid: Balance,
    pub remaining: Balance,
    pub currency: String,
}

impl EventStatement {
    pub fn for_event(event: &Event) -> Self {
        Self {
            event: event.id,
            status: event.status,
            total_cost: event.total_cost,
            total_paid: total_paid(&event.payments),
            remaining: remaining_balance(event.total_cost, &event.payments),
            currency: crate::domain::payment::DEFAULT_CURRENCY.to_string(),
        }
    }
}
