//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `BookingEngine`, the single entry point for
//! mutating bookings. Every composition-changing operation ends in a
//! mandatory requote before the event row is persisted, so a stale cached
//! `total_cost` cannot be produced by forgetting a recomputation.

pub mod engine;
