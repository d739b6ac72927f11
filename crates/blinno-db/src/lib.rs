//! # blinno-db: Database Layer for BLINNO Entitlements
//!
//! Postgres access for the entitlement service: subscription lookup,
//! product/portfolio counts and inserts, and the tip ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BLINNO Entitlements Data Flow                     │
//! │                                                                         │
//! │  POST /api/products                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EntitlementService (blinno-api)                                       │
//! │       │  dyn SubscriptionStore / dyn ResourceStore                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     blinno-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ SubscriptionRepo   │  │            │  │   │
//! │  │   │ PgPool        │◄───│ ResourceRepo       │  │ 001_...sql │  │   │
//! │  │   │               │    │ TipRepo            │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Postgres (Supabase project)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - Store traits and row types
//! - [`repository`] - Postgres implementations of the store traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blinno_db::{Database, DbConfig, ResourceStore};
//! use blinno_core::ResourceKind;
//!
//! let db = Database::new(DbConfig::new(database_url)).await?;
//! let count = db.resources().count_owned(ResourceKind::Product, user_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{
    NewPortfolio, NewProduct, NewTip, PortfolioRecord, ProductRecord, RecordedTip,
    ResourceStore, SubscriptionRecord, SubscriptionStore, TipLedger, TipRecord,
};

// Repository re-exports for convenience
pub use repository::resource::ResourceRepository;
pub use repository::subscription::SubscriptionRepository;
pub use repository::tip::TipRepository;
