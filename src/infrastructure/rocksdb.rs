use crate::domain::audit::AuditEntry;
use crate::domain::catalog::{Package, Vendor, Venue};
use crate::domain::event::Event;
use crate::domain::ports::{AuditSink, CatalogStore, EventStore};
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Column Family for event rows (each row carries its owned selections,
/// guests, and payments).
pub const CF_EVENTS: &str = "events";
/// Column Families for the catalog.
pub const CF_VENUES: &str = "venues";
pub const CF_PACKAGES: &str = "packages";
pub const CF_VENDORS: &str = "vendors";
/// Column Family for the append-only audit trail.
pub const CF_AUDIT: &str = "audit";

/// A persistent store backed by RocksDB.
///
/// One database serves as event store, catalog store, and audit sink,
/// with a Column Family per entity kind. Values are JSON-encoded.
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
    audit_seq: Arc<AtomicU32>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path,
    /// ensuring all required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_EVENTS, CF_VENUES, CF_PACKAGES, CF_VENDORS, CF_AUDIT]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)
            .map_err(|e| BookingError::InternalError(Box::new(e)))?;

        Ok(Self {
            db: Arc::new(db),
            audit_seq: Arc::new(AtomicU32::new(0)),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            BookingError::InternalError(Box::new(std::io::Error::other(format!(
                "Column family {name} not found"
            ))))
        })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: u32, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)
            .map_err(|e| BookingError::InternalError(Box::new(e)))?;
        self.db
            .put_cf(cf, key.to_be_bytes(), bytes)
            .map_err(|e| BookingError::InternalError(Box::new(e)))
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: u32) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        let result = self
            .db
            .get_cf(cf, key.to_be_bytes())
            .map_err(|e| BookingError::InternalError(Box::new(e)))?;
        match result {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| BookingError::InternalError(Box::new(e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EventStore for RocksDbStore {
    async fn store(&self, event: Event) -> Result<()> {
        self.put(CF_EVENTS, event.id, &event)
    }

    async fn get(&self, event_id: u32) -> Result<Option<Event>> {
        self.fetch(CF_EVENTS, event_id)
    }

    async fn remove(&self, event_id: u32) -> Result<Option<Event>> {
        let existing: Option<Event> = self.fetch(CF_EVENTS, event_id)?;
        if existing.is_some() {
            let cf = self.cf(CF_EVENTS)?;
            self.db
                .delete_cf(cf, event_id.to_be_bytes())
                .map_err(|e| BookingError::InternalError(Box::new(e)))?;
        }
        Ok(existing)
    }

    async fn get_all(&self) -> Result<Vec<Event>> {
        let cf = self.cf(CF_EVENTS)?;
        let mut events = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item.map_err(|e| BookingError::InternalError(Box::new(e)))?;
            let event: Event = serde_json::from_slice(&value)
                .map_err(|e| BookingError::InternalError(Box::new(e)))?;
            events.push(event);
        }
        Ok(events)
    }
}

#[async_trait]
impl CatalogStore for RocksDbStore {
    async fn store_venue(&self, venue: Venue) -> Result<()> {
        self.put(CF_VENUES, venue.id, &venue)
    }

    async fn get_venue(&self, venue_id: u32) -> Result<Option<Venue>> {
        self.fetch(CF_VENUES, venue_id)
    }

    async fn store_package(&self, package: Package) -> Result<()> {
        self.put(CF_PACKAGES, package.id, &package)
    }

    async fn get_package(&self, package_id: u32) -> Result<Option<Package>> {
        self.fetch(CF_PACKAGES, package_id)
    }

    async fn store_vendor(&self, vendor: Vendor) -> Result<()> {
        self.put(CF_VENDORS, vendor.id, &vendor)
    }

    async fn get_vendor(&self, vendor_id: u32) -> Result<Option<Vendor>> {
        self.fetch(CF_VENDORS, vendor_id)
    }
}

#[async_trait]
impl AuditSink for RocksDbStore {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        let cf = self.cf(CF_AUDIT)?;
        // Millisecond timestamp plus an in-process counter keeps keys
        // unique and time-ordered across reopens.
        let millis = entry.created_at.timestamp_millis().max(0) as u64;
        let seq = self.audit_seq.fetch_add(1, Ordering::Relaxed);
        let mut key = [0u8; 12];
        key[..8].copy_from_slice(&millis.to_be_bytes());
        key[8..].copy_from_slice(&seq.to_be_bytes());
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| BookingError::InternalError(Box::new(e)))?;
        self.db
            .put_cf(cf, key, bytes)
            .map_err(|e| BookingError::InternalError(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventStatus;
    use crate::domain::money::Balance;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn event(id: u32) -> Event {
        let now = Utc::now();
        Event {
            id,
            client_id: 7,
            name: "Party".into(),
            event_type: "Birthday".into(),
            event_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            expected_guest_count: 10,
            package_id: Some(1),
            venue_id: None,
            vendor_selections: Vec::new(),
            guests: Vec::new(),
            payments: Vec::new(),
            status: EventStatus::Pending,
            special_requests: None,
            admin_notes: None,
            approval_date: None,
            total_cost: Balance::new(dec!(5000)),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_open_creates_column_families() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).expect("Failed to open RocksDB");
        for cf in [CF_EVENTS, CF_VENUES, CF_PACKAGES, CF_VENDORS, CF_AUDIT] {
            assert!(store.db.cf_handle(cf).is_some());
        }
    }

    #[tokio::test]
    async fn test_event_round_trip_and_remove() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let e = event(1);
        EventStore::store(&store, e.clone()).await.unwrap();
        assert_eq!(EventStore::get(&store, 1).await.unwrap().unwrap(), e);
        assert_eq!(store.get_all().await.unwrap().len(), 1);

        let removed = store.remove(1).await.unwrap();
        assert_eq!(removed.unwrap().id, 1);
        assert!(EventStore::get(&store, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_catalog_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let package = Package {
            id: 3,
            name: "Premium".into(),
            base_price: dec!(90000),
            price_per_guest: dec!(800),
            max_guests: Some(300),
            is_active: true,
        };
        store.store_package(package.clone()).await.unwrap();
        assert_eq!(store.get_package(3).await.unwrap().unwrap(), package);
        assert!(store.get_package(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_audit_entries_do_not_collide() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        for i in 0..5 {
            store
                .record(AuditEntry::new("CREATE", "Event", i, 7, "created"))
                .await
                .unwrap();
        }
        let cf = store.cf(CF_AUDIT).unwrap();
        let count = store
            .db
            .iterator_cf(cf, rocksdb::IteratorMode::Start)
            .count();
        assert_eq!(count, 5);
    }
}
