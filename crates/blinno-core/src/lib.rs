//! # blinno-core: Pure Business Logic for BLINNO Entitlements
//!
//! This crate holds the business rules that decide what a BLINNO user may
//! create and how money from tips and orders is split. Everything here is a
//! pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      BLINNO Entitlements Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React SPA)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    blinno-api (axum)                            │   │
//! │  │    POST /api/products, POST /api/portfolios, POST /api/tips    │   │
//! │  │    EntitlementService (resolve tier → count → decide)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ blinno-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   tiers   │  │entitlement│  │   fees    │  │   money   │  │   │
//! │  │   │  catalog  │  │ evaluate  │  │ breakdown │  │ Money,Rate│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    blinno-db (Postgres/Supabase)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TierInfo, Limit, EntitlementResult, FeeBreakdown)
//! - [`tiers`] - Static tier catalog
//! - [`entitlement`] - Limit decisions
//! - [`fees`] - Fee schedule and fee calculator
//! - [`money`] - Money in integer minor units (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use blinno_core::{entitlement, tiers, ResourceKind};
//!
//! let tier = tiers::resolve(Some("subscription"), Some("creator"), None);
//! let limit = tier.limits.for_kind(ResourceKind::Product);
//!
//! assert!(entitlement::evaluate(limit, 24).can_create);
//! assert!(!entitlement::evaluate(limit, 25).can_create);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entitlement;
pub mod error;
pub mod fees;
pub mod money;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use fees::FeeSchedule;
pub use money::{Currency, Money, Rate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest tip or order accepted, in minor units (10 million major units).
pub const MAX_AMOUNT_MINOR: i64 = 1_000_000_000;

/// Maximum product/portfolio title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 5_000;

/// Maximum tip message length in characters.
pub const MAX_MESSAGE_LEN: usize = 500;
