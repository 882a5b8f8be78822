use crate::domain::money::Balance;
use crate::domain::payment::Payment;
use crate::error::{BookingError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of an event booking.
///
/// Transitions are validated against an explicit table; Completed,
/// Cancelled, and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl EventStatus {
    /// Whether moving from `self` to `to` is a legal lifecycle step.
    /// Self-transitions are not steps and are rejected.
    pub fn can_transition_to(self, to: EventStatus) -> bool {
        use EventStatus::*;
        matches!(
            (self, to),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Approved, InProgress)
                | (Approved, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EventStatus::Completed | EventStatus::Cancelled | EventStatus::Rejected
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDING",
            EventStatus::Approved => "APPROVED",
            EventStatus::InProgress => "IN_PROGRESS",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
            EventStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for EventStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(EventStatus::Pending),
            "APPROVED" => Ok(EventStatus::Approved),
            "IN_PROGRESS" => Ok(EventStatus::InProgress),
            "COMPLETED" => Ok(EventStatus::Completed),
            "CANCELLED" => Ok(EventStatus::Cancelled),
            "REJECTED" => Ok(EventStatus::Rejected),
            other => Err(BookingError::validation(format!(
                "Invalid event status: {other}"
            ))),
        }
    }
}

/// RSVP state of an invited guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

/// An invited guest. Owned by the event; guests never affect pricing,
/// only `expected_guest_count` does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub plus_one_count: u32,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A line item binding a vendor to an event. `custom_price`, when present,
/// overrides the vendor's listed base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSelection {
    pub vendor_id: u32,
    pub quantity: u32,
    pub custom_price: Option<Decimal>,
    pub notes: Option<String>,
}

/// A bookable occasion: an optional package, an optional venue, and zero
/// or more vendor line items, owned guests, and owned payments.
///
/// `total_cost` is a cache of the pricing engine's output, persisted for
/// display. It is recomputed by the application layer on every
/// composition-changing mutation and is never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub client_id: u32,
    pub name: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub expected_guest_count: u32,
    pub package_id: Option<u32>,
    pub venue_id: Option<u32>,
    pub vendor_selections: Vec<VendorSelection>,
    pub guests: Vec<Guest>,
    pub payments: Vec<Payment>,
    pub status: EventStatus,
    pub special_requests: Option<String>,
    pub admin_notes: Option<String>,
    pub approval_date: Option<DateTime<Utc>>,
    pub total_cost: Balance,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Composition and details may only change while the booking is still
    /// being negotiated.
    pub fn is_editable(&self) -> bool {
        matches!(self.status, EventStatus::Pending | EventStatus::Approved)
    }

    /// Only bookings the admin never picked up (or turned down) can be
    /// removed by the client.
    pub fn is_deletable(&self) -> bool {
        matches!(self.status, EventStatus::Pending | EventStatus::Rejected)
    }

    pub fn selection(&self, vendor_id: u32) -> Option<&VendorSelection> {
        self.vendor_selections
            .iter()
            .find(|s| s.vendor_id == vendor_id)
    }

    /// Adds a vendor line item. One line per vendor; quantity must be at
    /// least 1 and a custom price, if given, non-negative.
    pub fn add_selection(&mut self, selection: VendorSelection) -> Result<()> {
        if selection.quantity == 0 {
            return Err(BookingError::validation("Vendor quantity must be positive"));
        }
        if let Some(price) = selection.custom_price
            && price < Decimal::ZERO
        {
            return Err(BookingError::validation("Custom price must not be negative"));
        }
        if self.selection(selection.vendor_id).is_some() {
            return Err(BookingError::validation(
                "This vendor is already added to the event",
            ));
        }
        self.vendor_selections.push(selection);
        Ok(())
    }

    pub fn remove_selection(&mut self, vendor_id: u32) -> Result<VendorSelection> {
        let idx = self
            .vendor_selections
            .iter()
            .position(|s| s.vendor_id == vendor_id)
            .ok_or(BookingError::not_found("VendorSelection", vendor_id))?;
        Ok(self.vendor_selections.remove(idx))
    }

    /// Applies a validated status transition, stamping the approval date
    /// when the booking is approved.
    pub fn transition_to(&mut self, to: EventStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(to) {
            return Err(BookingError::validation(format!(
                "Illegal status transition: {} -> {}",
                self.status.as_str(),
                to.as_str()
            )));
        }
        self.status = to;
        if to == EventStatus::Approved {
            self.approval_date = Some(now);
        }
        Ok(())
    }
}
