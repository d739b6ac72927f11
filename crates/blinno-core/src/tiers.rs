//! # Tier Catalog
//!
//! Static limit tables for both pricing tracks.
//!
//! ```text
//! ┌──────────────────────────────────────┬──────────────────────────────────┐
//! │  Subscription track                  │  Percentage track                │
//! │  tier          products  portfolios  │  tier      products  portfolios  │
//! │  free                 5           3  │  basic           10           5  │
//! │  creator             25          10  │  premium         50          25  │
//! │  professional       100          50  │  pro      unlimited   unlimited  │
//! │  enterprise   unlimited   unlimited  │                                  │
//! └──────────────────────────────────────┴──────────────────────────────────┘
//! ```
//!
//! Unknown names on either track fall back to `free`. The tables are
//! compile-time constants; nothing here mutates.

use crate::types::{
    Limit, PercentageTier, PricingModel, SubscriptionTier, TierInfo, TierLimits,
};

const fn limits(products: Limit, portfolios: Limit) -> TierLimits {
    TierLimits {
        products,
        portfolios,
    }
}

const fn subscription(tier: SubscriptionTier, limits: TierLimits) -> TierInfo {
    TierInfo {
        pricing_model: PricingModel::Subscription,
        tier_name: tier.name(),
        limits,
    }
}

const fn percentage(tier: PercentageTier, limits: TierLimits) -> TierInfo {
    TierInfo {
        pricing_model: PricingModel::Percentage,
        tier_name: tier.name(),
        limits,
    }
}

/// The tier every unresolved user lands on.
pub const FREE_TIER: TierInfo = subscription(
    SubscriptionTier::Free,
    limits(Limit::Capped(5), Limit::Capped(3)),
);

/// Subscription-track catalog, indexed in [`SubscriptionTier::ALL`] order.
pub static SUBSCRIPTION_TIERS: [TierInfo; 4] = [
    FREE_TIER,
    subscription(
        SubscriptionTier::Creator,
        limits(Limit::Capped(25), Limit::Capped(10)),
    ),
    subscription(
        SubscriptionTier::Professional,
        limits(Limit::Capped(100), Limit::Capped(50)),
    ),
    subscription(
        SubscriptionTier::Enterprise,
        limits(Limit::Unlimited, Limit::Unlimited),
    ),
];

/// Percentage-track catalog, indexed in [`PercentageTier::ALL`] order.
pub static PERCENTAGE_TIERS: [TierInfo; 3] = [
    percentage(
        PercentageTier::Basic,
        limits(Limit::Capped(10), Limit::Capped(5)),
    ),
    percentage(
        PercentageTier::Premium,
        limits(Limit::Capped(50), Limit::Capped(25)),
    ),
    percentage(
        PercentageTier::Pro,
        limits(Limit::Unlimited, Limit::Unlimited),
    ),
];

/// Catalog entry for a known subscription tier.
pub fn subscription_tier(tier: SubscriptionTier) -> &'static TierInfo {
    match tier {
        SubscriptionTier::Free => &SUBSCRIPTION_TIERS[0],
        SubscriptionTier::Creator => &SUBSCRIPTION_TIERS[1],
        SubscriptionTier::Professional => &SUBSCRIPTION_TIERS[2],
        SubscriptionTier::Enterprise => &SUBSCRIPTION_TIERS[3],
    }
}

/// Catalog entry for a known percentage tier.
pub fn percentage_tier(tier: PercentageTier) -> &'static TierInfo {
    match tier {
        PercentageTier::Basic => &PERCENTAGE_TIERS[0],
        PercentageTier::Premium => &PERCENTAGE_TIERS[1],
        PercentageTier::Pro => &PERCENTAGE_TIERS[2],
    }
}

/// Looks up a subscription tier by its stored name, defaulting to free.
pub fn subscription_tier_by_name(name: Option<&str>) -> TierInfo {
    name.and_then(SubscriptionTier::from_name)
        .map(|t| *subscription_tier(t))
        .unwrap_or(FREE_TIER)
}

/// Looks up a percentage tier by its stored name, defaulting to free.
pub fn percentage_tier_by_name(name: Option<&str>) -> TierInfo {
    name.and_then(PercentageTier::from_name)
        .map(|t| *percentage_tier(t))
        .unwrap_or(FREE_TIER)
}

/// Resolves the stored plan columns to a catalog entry.
///
/// `pricing_model == "percentage"` consults the percentage catalog keyed by
/// `percentage_tier`; anything else consults the subscription catalog keyed
/// by `tier`. Unknown names on either side resolve to [`FREE_TIER`].
pub fn resolve(
    pricing_model: Option<&str>,
    tier: Option<&str>,
    percentage_tier: Option<&str>,
) -> TierInfo {
    match PricingModel::from_column(pricing_model) {
        PricingModel::Percentage => percentage_tier_by_name(percentage_tier),
        PricingModel::Subscription => subscription_tier_by_name(tier),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceKind;

    #[test]
    fn test_free_tier_limits() {
        assert_eq!(FREE_TIER.tier_name, "free");
        assert_eq!(FREE_TIER.limits.products, Limit::Capped(5));
        assert_eq!(FREE_TIER.limits.portfolios, Limit::Capped(3));
    }

    #[test]
    fn test_catalog_order_matches_enums() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(subscription_tier(tier).tier_name, tier.name());
            assert_eq!(subscription_tier(tier).pricing_model, PricingModel::Subscription);
        }
        for tier in PercentageTier::ALL {
            assert_eq!(percentage_tier(tier).tier_name, tier.name());
            assert_eq!(percentage_tier(tier).pricing_model, PricingModel::Percentage);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_free() {
        assert_eq!(subscription_tier_by_name(Some("platinum")), FREE_TIER);
        assert_eq!(subscription_tier_by_name(None), FREE_TIER);
        assert_eq!(percentage_tier_by_name(Some("gold")), FREE_TIER);
        assert_eq!(percentage_tier_by_name(None), FREE_TIER);
    }

    #[test]
    fn test_resolve_picks_catalog_by_pricing_model() {
        let sub = resolve(Some("subscription"), Some("creator"), Some("premium"));
        assert_eq!(sub.tier_name, "creator");

        let pct = resolve(Some("percentage"), Some("creator"), Some("premium"));
        assert_eq!(pct.tier_name, "premium");
        assert_eq!(pct.pricing_model, PricingModel::Percentage);
    }

    #[test]
    fn test_resolve_missing_model_uses_subscription_catalog() {
        let info = resolve(None, Some("professional"), None);
        assert_eq!(info.tier_name, "professional");
        assert_eq!(info.limits.for_kind(ResourceKind::Product), Limit::Capped(100));
    }

    #[test]
    fn test_top_tiers_are_unlimited() {
        let enterprise = subscription_tier(SubscriptionTier::Enterprise);
        let pro = percentage_tier(PercentageTier::Pro);
        for kind in ResourceKind::ALL {
            assert!(enterprise.limits.for_kind(kind).is_unlimited());
            assert!(pro.limits.for_kind(kind).is_unlimited());
        }
    }
}
