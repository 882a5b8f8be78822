use crate::domain::audit::AuditEntry;
use crate::domain::context::Actor;
use crate::domain::event::{Event, EventStatus, Guest, RsvpStatus, VendorSelection};
use crate::domain::ledger::{self, EventStatement};
use crate::domain::money::Balance;
use crate::domain::payment::{Payment, ReceiptSequence};
use crate::domain::ports::{AuditSinkBox, CatalogStoreBox, EventStoreBox};
use crate::domain::pricing::{self, Quote, QuoteLine};
use crate::error::{BookingError, Result};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Input for creating a booking. The id is caller-assigned so replayed
/// instruction streams stay deterministic.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub id: u32,
    pub name: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub expected_guest_count: u32,
    pub package_id: Option<u32>,
    pub venue_id: Option<u32>,
    pub special_requests: Option<String>,
}

/// Editable header fields of an existing booking.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub name: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub expected_guest_count: u32,
}

/// Input for adding an invited guest.
#[derive(Debug, Clone)]
pub struct GuestDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plus_one_count: u32,
}

/// The main entry point for booking mutations and reconciliation reads.
///
/// Owns the storage ports. Each operation validates the acting user,
/// applies the change, requotes the event where composition changed, and
/// persists the whole row in one store call so a failure partway leaves
/// the stored state untouched.
pub struct BookingEngine {
    events: EventStoreBox,
    catalog: CatalogStoreBox,
    audit: AuditSinkBox,
    receipts: ReceiptSequence,
}

impl BookingEngine {
    pub fn new(events: EventStoreBox, catalog: CatalogStoreBox, audit: AuditSinkBox) -> Self {
        Self {
            events,
            catalog,
            audit,
            receipts: ReceiptSequence::new(),
        }
    }

    pub async fn create_event(&self, actor: Actor, new: NewEvent) -> Result<Event> {
        if new.expected_guest_count == 0 {
            return Err(BookingError::validation("Guest count must be positive"));
        }
        if new.event_date <= Utc::now().date_naive() {
            return Err(BookingError::validation("Event date must be in the future"));
        }
        if self.events.get(new.id).await?.is_some() {
            return Err(BookingError::validation(format!(
                "Event {} already exists",
                new.id
            )));
        }
        self.check_package(new.package_id, new.expected_guest_count)
            .await?;
        self.check_venue(new.venue_id, new.expected_guest_count)
            .await?;

        let now = Utc::now();
        let mut event = Event {
            id: new.id,
            client_id: actor.user_id,
            name: new.name,
            event_type: new.event_type,
            event_date: new.event_date,
            expected_guest_count: new.expected_guest_count,
            package_id: new.package_id,
            venue_id: new.venue_id,
            vendor_selections: Vec::new(),
            guests: Vec::new(),
            payments: Vec::new(),
            status: EventStatus::Pending,
            special_requests: new.special_requests,
            admin_notes: None,
            approval_date: None,
            total_cost: Balance::ZERO,
            created_at: now,
            updated_at: now,
        };
        self.requote(&mut event).await?;
        self.events.store(event.clone()).await?;

        info!(event = event.id, client = actor.user_id, "event created");
        self.log_audit(actor, "CREATE", "Event", event.id, "Event created by client")
            .await?;
        Ok(event)
    }

    pub async fn update_details(
        &self,
        actor: Actor,
        event_id: u32,
        details: EventDetails,
    ) -> Result<Event> {
        if details.expected_guest_count == 0 {
            return Err(BookingError::validation("Guest count must be positive"));
        }
        let mut event = self.load_editable(actor, event_id).await?;
        self.check_package(event.package_id, details.expected_guest_count)
            .await?;
        self.check_venue(event.venue_id, details.expected_guest_count)
            .await?;

        event.name = details.name;
        event.event_type = details.event_type;
        event.event_date = details.event_date;
        event.expected_guest_count = details.expected_guest_count;
        self.persist_requoted(&mut event).await?;

        self.log_audit(actor, "UPDATE", "Event", event_id, "Event updated by client")
            .await?;
        Ok(event)
    }

    pub async fn set_package(
        &self,
        actor: Actor,
        event_id: u32,
        package_id: Option<u32>,
    ) -> Result<Event> {
        let mut event = self.load_editable(actor, event_id).await?;
        self.check_package(package_id, event.expected_guest_count)
            .await?;
        event.package_id = package_id;
        self.persist_requoted(&mut event).await?;

        self.log_audit(actor, "UPDATE", "Event", event_id, "Package changed")
            .await?;
        Ok(event)
    }

    pub async fn set_venue(
        &self,
        actor: Actor,
        event_id: u32,
        venue_id: Option<u32>,
    ) -> Result<Event> {
        let mut event = self.load_editable(actor, event_id).await?;
        self.check_venue(venue_id, event.expected_guest_count).await?;
        event.venue_id = venue_id;
        self.persist_requoted(&mut event).await?;

        self.log_audit(actor, "UPDATE", "Event", event_id, "Venue changed")
            .await?;
        Ok(event)
    }

    pub async fn add_vendor(
        &self,
        actor: Actor,
        event_id: u32,
        vendor_id: u32,
        quantity: u32,
        custom_price: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<Event> {
        let mut event = self.load_editable(actor, event_id).await?;
        let vendor = self
            .catalog
            .get_vendor(vendor_id)
            .await?
            .ok_or(BookingError::not_found("Vendor", vendor_id))?;
        event.add_selection(VendorSelection {
            vendor_id,
            quantity,
            custom_price,
            notes,
        })?;
        self.persist_requoted(&mut event).await?;

        self.log_audit(
            actor,
            "CREATE",
            "EventVendor",
            event_id,
            format!("Vendor {} added to event {event_id}", vendor.name),
        )
        .await?;
        Ok(event)
    }

    pub async fn remove_vendor(&self, actor: Actor, event_id: u32, vendor_id: u32) -> Result<Event> {
        let mut event = self.load_editable(actor, event_id).await?;
        event.remove_selection(vendor_id)?;
        self.persist_requoted(&mut event).await?;

        self.log_audit(
            actor,
            "DELETE",
            "EventVendor",
            event_id,
            format!("Vendor removed from event {event_id}"),
        )
        .await?;
        Ok(event)
    }

    /// Guest-list management. Guests never affect pricing, so no requote.
    pub async fn add_guest(&self, actor: Actor, event_id: u32, draft: GuestDraft) -> Result<Event> {
        let mut event = self.load_owned(actor, event_id).await?;
        let id = event.guests.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        event.guests.push(Guest {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            rsvp_status: RsvpStatus::Pending,
            plus_one_count: draft.plus_one_count,
        });
        event.updated_at = Utc::now();
        self.events.store(event.clone()).await?;

        self.log_audit(actor, "CREATE", "Guest", event_id, "Guest added")
            .await?;
        Ok(event)
    }

    pub async fn remove_guest(&self, actor: Actor, event_id: u32, guest_id: u32) -> Result<Event> {
        let mut event = self.load_owned(actor, event_id).await?;
        let idx = event
            .guests
            .iter()
            .position(|g| g.id == guest_id)
            .ok_or(BookingError::not_found("Guest", guest_id))?;
        event.guests.remove(idx);
        event.updated_at = Utc::now();
        self.events.store(event.clone()).await?;

        self.log_audit(actor, "DELETE", "Guest", event_id, "Guest removed")
            .await?;
        Ok(event)
    }

    /// Records a mock-settled payment after ledger admission. On
    /// rejection nothing is persisted.
    pub async fn record_payment(
        &self,
        actor: Actor,
        event_id: u32,
        amount: Decimal,
        method: &str,
    ) -> Result<Payment> {
        let mut event = self.load_owned(actor, event_id).await?;
        let amount = ledger::admit_payment(event.total_cost, &event.payments, amount)?;
        let id = event.payments.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let payment = Payment::settled(id, amount, method, &self.receipts);
        event.payments.push(payment.clone());
        event.updated_at = Utc::now();
        self.events.store(event).await?;

        info!(
            event = event_id,
            amount = %amount.value(),
            "payment recorded"
        );
        self.log_audit(
            actor,
            "CREATE",
            "Payment",
            event_id,
            format!("Payment made for event {event_id}"),
        )
        .await?;
        Ok(payment)
    }

    /// Admin-only lifecycle step, checked against the transition table.
    pub async fn update_status(
        &self,
        actor: Actor,
        event_id: u32,
        to: EventStatus,
        admin_notes: Option<String>,
    ) -> Result<Event> {
        actor.require_admin()?;
        let mut event = self
            .events
            .get(event_id)
            .await?
            .ok_or(BookingError::not_found("Event", event_id))?;
        let from = event.status;
        event.transition_to(to, Utc::now())?;
        if let Some(notes) = admin_notes {
            event.admin_notes = Some(notes);
        }
        event.updated_at = Utc::now();
        self.events.store(event.clone()).await?;

        info!(event = event_id, from = from.as_str(), to = to.as_str(), "status updated");
        self.log_audit(
            actor,
            "UPDATE",
            "Event",
            event_id,
            format!("Event status updated to {}", to.as_str()),
        )
        .await?;
        Ok(event)
    }

    /// Removes the event row; selections, guests, and payments are owned
    /// by the row and go with it.
    pub async fn delete_event(&self, actor: Actor, event_id: u32) -> Result<Event> {
        let event = self.load_owned(actor, event_id).await?;
        if !event.is_deletable() {
            return Err(BookingError::validation(
                "Only pending or rejected events can be deleted",
            ));
        }
        let removed = self
            .events
            .remove(event_id)
            .await?
            .ok_or(BookingError::not_found("Event", event_id))?;

        self.log_audit(actor, "DELETE", "Event", event_id, "Event deleted by client")
            .await?;
        Ok(removed)
    }

    pub async fn get_event(&self, actor: Actor, event_id: u32) -> Result<Event> {
        let event = self
            .events
            .get(event_id)
            .await?
            .ok_or(BookingError::not_found("Event", event_id))?;
        actor.require_view(&event)?;
        Ok(event)
    }

    pub async fn statement(&self, actor: Actor, event_id: u32) -> Result<EventStatement> {
        let event = self.get_event(actor, event_id).await?;
        Ok(EventStatement::for_event(&event))
    }

    /// Reconciliation rows for every event, sorted by id.
    pub async fn statements(&self) -> Result<Vec<EventStatement>> {
        let mut events = self.events.get_all().await?;
        events.sort_by_key(|e| e.id);
        Ok(events.iter().map(EventStatement::for_event).collect())
    }

    async fn load_owned(&self, actor: Actor, event_id: u32) -> Result<Event> {
        let event = self
            .events
            .get(event_id)
            .await?
            .ok_or(BookingError::not_found("Event", event_id))?;
        actor.require_owner(&event)?;
        Ok(event)
    }

    async fn load_editable(&self, actor: Actor, event_id: u32) -> Result<Event> {
        let event = self.load_owned(actor, event_id).await?;
        if !event.is_editable() {
            return Err(BookingError::validation(
                "This event cannot be edited in its current status",
            ));
        }
        Ok(event)
    }

    async fn check_package(&self, package_id: Option<u32>, guest_count: u32) -> Result<()> {
        if let Some(id) = package_id {
            let package = self
                .catalog
                .get_package(id)
                .await?
                .ok_or(BookingError::not_found("Package", id))?;
            if let Some(max) = package.max_guests
                && guest_count > max
            {
                return Err(BookingError::validation(format!(
                    "Package allows at most {max} guests"
                )));
            }
        }
        Ok(())
    }

    async fn check_venue(&self, venue_id: Option<u32>, guest_count: u32) -> Result<()> {
        if let Some(id) = venue_id {
            let venue = self
                .catalog
                .get_venue(id)
                .await?
                .ok_or(BookingError::not_found("Venue", id))?;
            if !venue.suits_guest_count(guest_count) {
                return Err(BookingError::validation(format!(
                    "Venue capacity ({}) is less than expected guests",
                    venue.capacity
                )));
            }
        }
        Ok(())
    }

    /// Recomputes the cached total from the current composition. Called
    /// from every composition-changing path before the row is stored.
    async fn requote(&self, event: &mut Event) -> Result<()> {
        let package = match event.package_id {
            Some(id) => self.catalog.get_package(id).await?,
            None => None,
        };
        let venue = match event.venue_id {
            Some(id) => self.catalog.get_venue(id).await?,
            None => None,
        };
        let mut vendors = Vec::with_capacity(event.vendor_selections.len());
        for selection in &event.vendor_selections {
            vendors.push(self.catalog.get_vendor(selection.vendor_id).await?);
        }
        let quote = Quote {
            guest_count: event.expected_guest_count,
            package: package.as_ref(),
            venue: venue.as_ref(),
            lines: event
                .vendor_selections
                .iter()
                .zip(vendors.iter())
                .map(|(selection, vendor)| QuoteLine {
                    selection,
                    vendor: vendor.as_ref(),
                })
                .collect(),
        };
        let total = pricing::total_cost(&quote);
        debug!(event = event.id, total = %total, "requoted");
        event.total_cost = total;
        Ok(())
    }

    async fn persist_requoted(&self, event: &mut Event) -> Result<()> {
        self.requote(event).await?;
        event.updated_at = Utc::now();
        self.events.store(event.clone()).await
    }

    async fn log_audit(
        &self,
        actor: Actor,
        action: &str,
        entity_type: &str,
        entity_id: u32,
        description: impl Into<String>,
    ) -> Result<()> {
        self.audit
            .record(AuditEntry::new(
                action,
                entity_type,
                entity_id,
                actor.user_id,
                description,
            ))
            .await
    }
}
