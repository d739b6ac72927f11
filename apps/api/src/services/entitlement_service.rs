//! Plan resolution and limit checks.
//!
//! ## Check Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  check_limit(user, product)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_tier(user) ── store error / no row ──► free tier (warn)        │
//! │       │                                                                 │
//! │       ├── unlimited ──► { canCreate: true, limit: -1, currentCount: 0 } │
//! │       │                 (no count query)                                │
//! │       ▼                                                                 │
//! │  count_owned(product, user) ── store error ──► canCreate: true (warn)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  canCreate = count < limit                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither operation returns an error. A broken store must not lock users out
//! of creating content, so failures degrade to the most permissive answer
//! that is still bounded by the free tier.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use blinno_core::{entitlement, tiers, EntitlementResult, ResourceKind, TierInfo};
use blinno_db::{ResourceStore, SubscriptionStore};

/// Maps a user to their plan.
#[derive(Clone)]
pub struct SubscriptionResolver {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionResolver {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        SubscriptionResolver { store }
    }

    /// Resolves the user's current plan. Reads the store on every call.
    pub async fn resolve_tier(&self, user_id: Uuid) -> TierInfo {
        match self.store.find_by_user(user_id).await {
            Ok(Some(record)) => {
                let tier = record.tier_info();
                debug!(
                    user_id = %user_id,
                    pricing_model = ?tier.pricing_model,
                    tier = tier.tier_name,
                    "Resolved subscription tier"
                );
                tier
            }
            Ok(None) => {
                debug!(user_id = %user_id, "No subscription, using free tier");
                tiers::FREE_TIER
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Subscription lookup failed, using free tier");
                tiers::FREE_TIER
            }
        }
    }
}

/// Decides whether a user may create one more product or portfolio.
#[derive(Clone)]
pub struct EntitlementService {
    resolver: SubscriptionResolver,
    resources: Arc<dyn ResourceStore>,
}

impl EntitlementService {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        resources: Arc<dyn ResourceStore>,
    ) -> Self {
        EntitlementService {
            resolver: SubscriptionResolver::new(subscriptions),
            resources,
        }
    }

    pub fn resolver(&self) -> &SubscriptionResolver {
        &self.resolver
    }

    /// Resolves the user's plan and checks `kind` against it.
    pub async fn check_limit(&self, user_id: Uuid, kind: ResourceKind) -> EntitlementResult {
        let tier = self.resolver.resolve_tier(user_id).await;
        self.check_against(&tier, user_id, kind).await
    }

    /// Checks `kind` against an already resolved plan.
    pub async fn check_against(
        &self,
        tier: &TierInfo,
        user_id: Uuid,
        kind: ResourceKind,
    ) -> EntitlementResult {
        let limit = tier.limits.for_kind(kind);

        if limit.is_unlimited() {
            return entitlement::unlimited();
        }

        match self.resources.count_owned(kind, user_id).await {
            Ok(count) => {
                let result = entitlement::evaluate(limit, count);
                debug!(
                    user_id = %user_id,
                    kind = %kind,
                    limit = %limit,
                    count,
                    can_create = result.can_create,
                    "Checked limit"
                );
                result
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    kind = %kind,
                    error = %e,
                    "Resource count failed, allowing creation"
                );
                entitlement::fail_open(limit)
            }
        }
    }
}
