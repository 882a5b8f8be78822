use crate::domain::audit::AuditEntry;
use crate::domain::catalog::{Package, Vendor, Venue};
use crate::domain::event::Event;
use crate::domain::ports::{AuditSink, CatalogStore, EventStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory event store.
///
/// An event row owns its selections, guests, and payments, so removing
/// the row is the cascade. `Clone` shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<u32, Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn store(&self, event: Event) -> Result<()> {
        let mut events = self.events.write().await;
        events.insert(event.id, event);
        Ok(())
    }

    async fn get(&self, event_id: u32) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&event_id).cloned())
    }

    async fn remove(&self, event_id: u32) -> Result<Option<Event>> {
        let mut events = self.events.write().await;
        Ok(events.remove(&event_id))
    }

    async fn get_all(&self) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        Ok(events.values().cloned().collect())
    }
}

/// In-memory venue/package/vendor catalog.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    venues: Arc<RwLock<HashMap<u32, Venue>>>,
    packages: Arc<RwLock<HashMap<u32, Package>>>,
    vendors: Arc<RwLock<HashMap<u32, Vendor>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn store_venue(&self, venue: Venue) -> Result<()> {
        self.venues.write().await.insert(venue.id, venue);
        Ok(())
    }

    async fn get_venue(&self, venue_id: u32) -> Result<Option<Venue>> {
        Ok(self.venues.read().await.get(&venue_id).cloned())
    }

    async fn store_package(&self, package: Package) -> Result<()> {
        self.packages.write().await.insert(package.id, package);
        Ok(())
    }

    async fn get_package(&self, package_id: u32) -> Result<Option<Package>> {
        Ok(self.packages.read().await.get(&package_id).cloned())
    }

    async fn store_vendor(&self, vendor: Vendor) -> Result<()> {
        self.vendors.write().await.insert(vendor.id, vendor);
        Ok(())
    }

    async fn get_vendor(&self, vendor_id: u32) -> Result<Option<Vendor>> {
        Ok(self.vendors.read().await.get(&vendor_id).cloned())
    }
}

/// Append-only in-memory audit trail.
#[derive(Default, Clone)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditLog {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
