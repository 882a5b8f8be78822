use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable venue. Priced as flat rent per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub capacity: u32,
    pub base_rent: Decimal,
    pub is_available: bool,
}

impl Venue {
    /// Rent is flat regardless of occupancy; the guest count is accepted
    /// for interface symmetry with package pricing but does not scale it.
    pub fn price_for_guests(&self, _guest_count: u32) -> Decimal {
        self.base_rent
    }

    /// Capacity is the only guest-count constraint a venue imposes.
    pub fn suits_guest_count(&self, guest_count: u32) -> bool {
        guest_count <= self.capacity
    }
}

/// A service package with a base price plus an optional per-guest rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub name: String,
    pub base_price: Decimal,
    pub price_per_guest: Decimal,
    pub max_guests: Option<u32>,
    pub is_active: bool,
}

impl Package {
    pub fn cost_for_guests(&self, guest_count: u32) -> Decimal {
        self.base_price + self.price_per_guest * Decimal::from(guest_count)
    }
}

/// A third-party vendor (catering, photography, ...) that can be attached
/// to an event as a line item. A vendor without a listed base price is
/// quoted at zero unless the selection carries a custom price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: u32,
    pub name: String,
    pub vendor_type: String,
    pub base_price: Option<Decimal>,
    pub is_available: bool,
}
