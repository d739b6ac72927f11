//! # BLINNO API
//!
//! HTTP server for plan limits and fee calculation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BLINNO API                                      │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────────┐│
//! │  │  Routes                  │  │  Services                            ││
//! │  │                          │  │                                      ││
//! │  │ • GET  /health           │  │ • SubscriptionResolver               ││
//! │  │ • GET  /api/subscription │  │     user → TierInfo (fail-open)      ││
//! │  │        /limits           │  │ • EntitlementService                 ││
//! │  │ • POST /api/products     │──►     (TierInfo, count) → canCreate    ││
//! │  │ • POST /api/portfolios   │  │                                      ││
//! │  │ • POST /api/tips[/quote] │  │ blinno-core::fees                    ││
//! │  │ • POST /api/orders       │  │     amount → FeeBreakdown            ││
//! │  │        /fee-quote        │  │                                      ││
//! │  └──────────────────────────┘  └──────────────────┬───────────────────┘│
//! │                                                   │                     │
//! │  ┌────────────────────────────────────────────────▼──────────────────┐ │
//! │  │  Stores (blinno-db): SubscriptionStore, ResourceStore, TipLedger  │ │
//! │  │  Postgres in production, in-memory fakes in tests                 │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DATABASE_URL` - Postgres connection string (required)
//! - `SUPABASE_JWT_SECRET` - Secret for verifying access tokens (required)
//! - `HTTP_PORT` - HTTP server port (default: 8080)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `BLINNO_STRICT_LIMITS` - Lock-and-recount on insert (default: false)
//! - `BLINNO_FEE_SCHEDULE` - Path to a fee schedule TOML file
//! - `PLATFORM_FEE_BPS`, `PROCESSING_FEE_BPS`, `FEE_ABSORPTION` - Fee overrides

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;

use blinno_core::FeeSchedule;
use blinno_db::{Database, ResourceStore, SubscriptionStore, TipLedger};

use crate::auth::JwtManager;
use crate::services::EntitlementService;

/// Shared application state.
pub struct AppState {
    pub entitlements: EntitlementService,
    pub resources: Arc<dyn ResourceStore>,
    pub tips: Arc<dyn TipLedger>,
    pub jwt: JwtManager,
    pub fees: FeeSchedule,
    /// Guard inserts with a lock and re-count.
    pub strict_limits: bool,
    /// Present when backed by Postgres; used by the health check.
    pub db: Option<Database>,
}

impl AppState {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        resources: Arc<dyn ResourceStore>,
        tips: Arc<dyn TipLedger>,
        jwt: JwtManager,
        fees: FeeSchedule,
    ) -> Self {
        AppState {
            entitlements: EntitlementService::new(subscriptions, resources.clone()),
            resources,
            tips,
            jwt,
            fees,
            strict_limits: false,
            db: None,
        }
    }

    /// State backed by the Postgres repositories.
    pub fn from_database(db: Database, config: &ApiConfig) -> Self {
        AppState::new(
            Arc::new(db.subscriptions()),
            Arc::new(db.resources()),
            Arc::new(db.tips()),
            JwtManager::new(&config.jwt_secret),
            config.fees.clone(),
        )
        .with_strict_limits(config.strict_limits)
        .with_database(db)
    }

    pub fn with_strict_limits(mut self, strict: bool) -> Self {
        self.strict_limits = strict;
        self
    }

    pub fn with_database(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }
}

/// Builds the application router with request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}
