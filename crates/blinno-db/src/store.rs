//! # Store Traits
//!
//! The seams between the service layer and Postgres.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EntitlementService ──► dyn SubscriptionStore ──► SubscriptionRepository│
//! │                    └──► dyn ResourceStore     ──► ResourceRepository    │
//! │  tips route        ──► dyn TipLedger          ──► TipRepository         │
//! │                                                                         │
//! │  Tests swap the right-hand side for in-memory fakes.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use blinno_core::{tiers, Currency, FeeBreakdown, Money, ResourceKind, TierInfo};

use crate::error::DbResult;

// =============================================================================
// Records
// =============================================================================

/// The plan columns of a `subscriptions` row.
///
/// Free-text columns are kept as stored; interpretation happens in
/// [`SubscriptionRecord::tier_info`].
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SubscriptionRecord {
    pub user_id: Uuid,
    pub tier: Option<String>,
    pub pricing_model: Option<String>,
    pub percentage_tier: Option<String>,
    pub status: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
}

impl SubscriptionRecord {
    /// A record with only the plan columns set.
    pub fn new(
        user_id: Uuid,
        pricing_model: Option<&str>,
        tier: Option<&str>,
        percentage_tier: Option<&str>,
    ) -> Self {
        SubscriptionRecord {
            user_id,
            tier: tier.map(str::to_string),
            pricing_model: pricing_model.map(str::to_string),
            percentage_tier: percentage_tier.map(str::to_string),
            status: Some("active".to_string()),
            current_period_end: None,
        }
    }

    /// Catalog entry for this row.
    pub fn tier_info(&self) -> TierInfo {
        tiers::resolve(
            self.pricing_model.as_deref(),
            self.tier.as_deref(),
            self.percentage_tier.as_deref(),
        )
    }
}

/// A row of `products`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A row of `portfolios`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row of `tips`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TipRecord {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub supporter_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inserts
// =============================================================================

/// Fields of a product supplied by the creator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Money,
    pub currency: Currency,
}

/// Fields of a portfolio supplied by the creator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPortfolio {
    pub title: String,
    pub description: Option<String>,
}

/// A tip together with the fee split computed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTip {
    pub creator_id: Uuid,
    pub supporter_id: Uuid,
    pub message: Option<String>,
    pub fees: FeeBreakdown,
}

/// A persisted tip and the id of its `platform_fees` audit row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTip {
    pub tip: TipRecord,
    pub fee_id: Uuid,
}

// =============================================================================
// Traits
// =============================================================================

/// Read access to per-user subscription rows.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// `Ok(None)` when the user has no row.
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SubscriptionRecord>>;
}

/// Products and portfolios owned by creators.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Number of rows of `kind` with `creator_id = owner`.
    async fn count_owned(&self, kind: ResourceKind, owner: Uuid) -> DbResult<i64>;

    /// Inserts a product.
    ///
    /// With `max_owned = Some(cap)` the insert is guarded: the owner's rows
    /// are re-counted under a per-owner lock and `Ok(None)` is returned when
    /// the count has already reached `cap`.
    async fn insert_product(
        &self,
        owner: Uuid,
        product: &NewProduct,
        max_owned: Option<u32>,
    ) -> DbResult<Option<ProductRecord>>;

    /// Inserts a portfolio; `max_owned` as for [`ResourceStore::insert_product`].
    async fn insert_portfolio(
        &self,
        owner: Uuid,
        portfolio: &NewPortfolio,
        max_owned: Option<u32>,
    ) -> DbResult<Option<PortfolioRecord>>;
}

/// Append-only ledger of tips and their fee audit rows.
#[async_trait]
pub trait TipLedger: Send + Sync {
    /// Writes the tip and its `platform_fees` row atomically.
    async fn record_tip(&self, tip: &NewTip) -> DbResult<RecordedTip>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinno_core::Limit;

    #[test]
    fn test_record_resolves_subscription_catalog() {
        let record = SubscriptionRecord::new(Uuid::nil(), Some("subscription"), Some("Creator"), None);
        let info = record.tier_info();
        assert_eq!(info.tier_name, "creator");
        assert_eq!(info.limits.products, Limit::Capped(25));
    }

    #[test]
    fn test_record_resolves_percentage_catalog() {
        let record = SubscriptionRecord::new(
            Uuid::nil(),
            Some("percentage"),
            Some("enterprise"),
            Some("premium"),
        );
        let info = record.tier_info();
        assert_eq!(info.tier_name, "premium");
        assert_eq!(info.limits.portfolios, Limit::Capped(25));
    }

    #[test]
    fn test_record_with_null_columns_is_free() {
        let record = SubscriptionRecord::new(Uuid::nil(), None, None, None);
        assert_eq!(record.tier_info(), tiers::FREE_TIER);
    }
}
