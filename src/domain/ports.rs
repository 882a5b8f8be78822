use crate::domain::audit::AuditEntry;
use crate::domain::catalog::{Package, Vendor, Venue};
use crate::domain::event::Event;
use crate::error::Result;
use async_trait::async_trait;

/// Storage for events. An event row carries its vendor selections,
/// guests, and payments, so removing it cascades by ownership.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn store(&self, event: Event) -> Result<()>;
    async fn get(&self, event_id: u32) -> Result<Option<Event>>;
    async fn remove(&self, event_id: u32) -> Result<Option<Event>>;
    async fn get_all(&self) -> Result<Vec<Event>>;
}

/// Read/write access to the venue, package, and vendor catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn store_venue(&self, venue: Venue) -> Result<()>;
    async fn get_venue(&self, venue_id: u32) -> Result<Option<Venue>>;
    async fn store_package(&self, package: Package) -> Result<()>;
    async fn get_package(&self, package_id: u32) -> Result<Option<Package>>;
    async fn store_vendor(&self, vendor: Vendor) -> Result<()>;
    async fn get_vendor(&self, vendor_id: u32) -> Result<Option<Vendor>>;
}

/// Append-only audit trail.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<()>;
}

pub type EventStoreBox = Box<dyn EventStore>;
pub type CatalogStoreBox = Box<dyn CatalogStore>;
pub type AuditSinkBox = Box<dyn AuditSink>;
