use crate::domain::catalog::{Package, Vendor, Venue};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Venue,
    Package,
    Vendor,
}

/// Raw catalog row: `kind,id,name,capacity,price,price_per_guest`.
///
/// `capacity` is the venue capacity or the package guest ceiling; `price`
/// is the venue rent, package base price, or vendor base price.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    kind: Kind,
    id: u32,
    name: String,
    capacity: Option<u32>,
    price: Option<Decimal>,
    price_per_guest: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Venue(Venue),
    Package(Package),
    Vendor(Vendor),
}

/// Reads catalog rows from a CSV source.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn items(self) -> impl Iterator<Item = Result<CatalogItem>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BookingError::from).and_then(into_item))
    }
}

fn non_negative(value: Decimal, what: &str) -> Result<Decimal> {
    if value < Decimal::ZERO {
        Err(BookingError::validation(format!(
            "{what} must not be negative"
        )))
    } else {
        Ok(value)
    }
}

fn into_item(record: CatalogRecord) -> Result<CatalogItem> {
    match record.kind {
        Kind::Venue => {
            let capacity = record
                .capacity
                .ok_or_else(|| BookingError::validation("Venue requires a capacity"))?;
            let base_rent = record
                .price
                .ok_or_else(|| BookingError::validation("Venue requires a base rent"))?;
            Ok(CatalogItem::Venue(Venue {
                id: record.id,
                name: record.name,
                capacity,
                base_rent: non_negative(base_rent, "Venue rent")?,
                is_available: true,
            }))
        }
        Kind::Package => {
            let base_price = record
                .price
                .ok_or_else(|| BookingError::validation("Package requires a base price"))?;
            let price_per_guest = record.price_per_guest.unwrap_or(Decimal::ZERO);
            Ok(CatalogItem::Package(Package {
                id: record.id,
                name: record.name,
                base_price: non_negative(base_price, "Package price")?,
                price_per_guest: non_negative(price_per_guest, "Per-guest price")?,
                max_guests: record.capacity,
                is_active: true,
            }))
        }
        Kind::Vendor => {
            let base_price = record
                .price
                .map(|p| non_negative(p, "Vendor price"))
                .transpose()?;
            Ok(CatalogItem::Vendor(Vendor {
                id: record.id,
                name: record.name,
                vendor_type: "General".into(),
                base_price,
                is_available: true,
            }))
        }
    }
}
