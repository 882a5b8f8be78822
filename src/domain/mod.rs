//! Domain layer: value objects, entities, and the pure pricing/ledger logic.
//!
//! Nothing in this module performs I/O. Storage access goes through the
//! traits in [`ports`], and all orchestration lives in the application layer.

pub mod audit;
pub mod catalog;
pub mod context;
pub mod event;
pub mod ledger;
pub mod money;
pub mod payment;
pub mod ports;
pub mod pricing;
