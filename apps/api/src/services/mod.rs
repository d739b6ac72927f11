//! Service layer.
//!
//! Services hold the request-independent logic the route handlers call:
//! plan resolution and limit checks. They talk to storage only through the
//! store traits from `blinno-db`.

pub mod entitlement_service;

pub use entitlement_service::{EntitlementService, SubscriptionResolver};
