//! The pricing engine: pure derivation of an event's total cost from its
//! package, venue, and vendor line items.
//!
//! All functions here are deterministic over their inputs and perform no
//! I/O. The application layer resolves the catalog rows, builds a
//! [`Quote`], and persists the result onto the event.

use crate::domain::catalog::{Package, Vendor, Venue};
use crate::domain::event::VendorSelection;
use crate::domain::money::Balance;
use rust_decimal::Decimal;

/// One vendor line item with its resolved catalog row. A missing vendor
/// row prices the line at zero unless the selection overrides the price.
#[derive(Debug, Clone, Copy)]
pub struct QuoteLine<'a> {
    pub selection: &'a VendorSelection,
    pub vendor: Option<&'a Vendor>,
}

/// Everything the pricing engine needs, already loaded.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    pub guest_count: u32,
    pub package: Option<&'a Package>,
    pub venue: Option<&'a Venue>,
    pub lines: Vec<QuoteLine<'a>>,
}

/// `base_price + price_per_guest * guest_count`, or zero with no package.
pub fn package_cost(package: Option<&Package>, guest_count: u32) -> Decimal {
    package.map_or(Decimal::ZERO, |p| p.cost_for_guests(guest_count))
}

/// Flat rent, or zero with no venue. Guest count never scales venue price.
pub fn venue_cost(venue: Option<&Venue>, guest_count: u32) -> Decimal {
    venue.map_or(Decimal::ZERO, |v| v.price_for_guests(guest_count))
}

/// `(custom_price ?? vendor.base_price ?? 0) * quantity`.
pub fn line_cost(selection: &VendorSelection, vendor: Option<&Vendor>) -> Decimal {
    let unit = selection
        .custom_price
        .or_else(|| vendor.and_then(|v| v.base_price))
        .unwrap_or(Decimal::ZERO);
    unit * Decimal::from(selection.quantity)
}

/// Total event cost. Summed package-first, venue, then vendor lines in
/// selection order, so any future rounding or logging is deterministic.
pub fn total_cost(quote: &Quote<'_>) -> Balance {
    let mut total = package_cost(quote.package, quote.guest_count);
    total += venue_cost(quote.venue, quote.guest_count);
    for line in &quote.lines {
        total += line_cost(line.selection, line.vendor);
    }
    Balance::new(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn package() -> Package {
        Package {
            id: 1,
            name: "Standard".into(),
            base_price: dec!(60000),
            price_per_guest: dec!(500),
            max_guests: None,
            is_active: true,
        }
    }

    fn venue() -> Venue {
        Venue {
            id: 1,
            name: "Grand Hall".into(),
            capacity: 500,
            base_rent: dec!(100000),
            is_available: true,
        }
    }

    fn vendor(base_price: Option<Decimal>) -> Vendor {
        Vendor {
            id: 1,
            name: "Shutterbug".into(),
            vendor_type: "Photography".into(),
            base_price,
            is_available: true,
        }
    }

    fn selection(quantity: u32, custom_price: Option<Decimal>) -> VendorSelection {
        VendorSelection {
            vendor_id: 1,
            quantity,
            custom_price,
            notes: None,
        }
    }

    #[test]
    fn test_empty_composition_totals_zero() {
        let quote = Quote {
            guest_count: 100,
            package: None,
            venue: None,
            lines: Vec::new(),
        };
        assert_eq!(total_cost(&quote), Balance::ZERO);
    }

    #[test]
    fn test_package_plus_venue() {
        // 60000 + 500*100 + 100000 = 210000
        let p = package();
        let v = venue();
        let quote = Quote {
            guest_count: 100,
            package: Some(&p),
            venue: Some(&v),
            lines: Vec::new(),
        };
        assert_eq!(total_cost(&quote), Balance::new(dec!(210000)));
    }

    #[test]
    fn test_vendor_line_at_base_price() {
        let p = package();
        let v = venue();
        let vendor = vendor(Some(dec!(15000)));
        let sel = selection(1, None);
        let quote = Quote {
            guest_count: 100,
            package: Some(&p),
            venue: Some(&v),
            lines: vec![QuoteLine {
                selection: &sel,
                vendor: Some(&vendor),
            }],
        };
        assert_eq!(total_cost(&quote), Balance::new(dec!(225000)));
    }

    #[test]
    fn test_custom_price_overrides_base_price() {
        let vendor = vendor(Some(dec!(15000)));
        let sel = selection(2, Some(dec!(12000)));
        assert_eq!(line_cost(&sel, Some(&vendor)), dec!(24000));
    }

    #[test]
    fn test_removing_custom_price_reverts_to_base() {
        let vendor = vendor(Some(dec!(15000)));
        let mut sel = selection(2, Some(dec!(12000)));
        sel.custom_price = None;
        assert_eq!(line_cost(&sel, Some(&vendor)), dec!(30000));
    }

    #[test]
    fn test_unpriced_vendor_contributes_zero() {
        let vendor = vendor(None);
        let sel = selection(3, None);
        assert_eq!(line_cost(&sel, Some(&vendor)), dec!(0));
    }

    #[test]
    fn test_missing_vendor_row_contributes_zero() {
        let sel = selection(3, None);
        assert_eq!(line_cost(&sel, None), dec!(0));
    }

    #[test]
    fn test_missing_vendor_row_with_custom_price_still_priced() {
        let sel = selection(2, Some(dec!(100)));
        assert_eq!(line_cost(&sel, None), dec!(200));
    }

    #[test]
    fn test_total_is_idempotent() {
        let p = package();
        let v = venue();
        let vendor = vendor(Some(dec!(15000)));
        let sel = selection(2, Some(dec!(12000)));
        let quote = Quote {
            guest_count: 100,
            package: Some(&p),
            venue: Some(&v),
            lines: vec![QuoteLine {
                selection: &sel,
                vendor: Some(&vendor),
            }],
        };
        assert_eq!(total_cost(&quote), total_cost(&quote));
    }

    #[test]
    fn test_venue_cost_flat_across_guest_counts() {
        let v = venue();
        assert_eq!(venue_cost(Some(&v), 1), venue_cost(Some(&v), 500));
    }
}
