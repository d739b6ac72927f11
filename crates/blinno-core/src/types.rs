//! # Domain Types
//!
//! Core domain types for BLINNO entitlements and fees.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TierInfo     │   │   TierLimits    │   │     Limit       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  pricing_model  │──►│  products       │──►│  Capped(n)      │       │
//! │  │  tier_name      │   │  portfolios     │   │  Unlimited (-1) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ EntitlementRes. │   │  FeeBreakdown   │   │  ResourceKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  can_create     │   │  subtotal       │   │  Product        │       │
//! │  │  limit          │   │  platform_fee   │   │  Portfolio      │       │
//! │  │  current_count  │   │  creator_payout │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire types serialize in camelCase because the React frontend reads them
//! directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Currency, Money};

// =============================================================================
// Pricing Model
// =============================================================================

/// How a user pays BLINNO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Flat recurring fee, tiered resource limits.
    Subscription,
    /// Commission per transaction, tiered resource limits.
    Percentage,
}

impl PricingModel {
    /// Parses the `pricing_model` column. Anything other than `percentage`
    /// is treated as a subscription.
    pub fn from_column(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "percentage" => PricingModel::Percentage,
            _ => PricingModel::Subscription,
        }
    }
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingModel::Subscription
    }
}

// =============================================================================
// Tier Names
// =============================================================================

/// Named plans on the subscription track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Creator,
    Professional,
    Enterprise,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Creator,
        SubscriptionTier::Professional,
        SubscriptionTier::Enterprise,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Creator => "creator",
            SubscriptionTier::Professional => "professional",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }

    /// Case-insensitive lookup; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// Named plans on the percentage (commission) track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PercentageTier {
    Basic,
    Premium,
    Pro,
}

impl PercentageTier {
    pub const ALL: [PercentageTier; 3] = [
        PercentageTier::Basic,
        PercentageTier::Premium,
        PercentageTier::Pro,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            PercentageTier::Basic => "basic",
            PercentageTier::Premium => "premium",
            PercentageTier::Pro => "pro",
        }
    }

    /// Case-insensitive lookup; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

// =============================================================================
// Limits
// =============================================================================

/// A resource-creation limit.
///
/// ## Wire Format
/// Serialized as a plain integer where `-1` means unlimited, which is what
/// the frontend and the stored plan data have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Limit {
    /// At most this many resources.
    Capped(u32),
    /// No limit.
    Unlimited,
}

impl Limit {
    /// Sentinel used on the wire for [`Limit::Unlimited`].
    pub const UNLIMITED_SENTINEL: i64 = -1;

    #[inline]
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// The finite cap, if any.
    #[inline]
    pub const fn cap(&self) -> Option<u32> {
        match self {
            Limit::Capped(n) => Some(*n),
            Limit::Unlimited => None,
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Capped(n) => n as i64,
            Limit::Unlimited => Limit::UNLIMITED_SENTINEL,
        }
    }
}

impl TryFrom<i64> for Limit {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            Limit::UNLIMITED_SENTINEL => Ok(Limit::Unlimited),
            n if n >= 0 && n <= u32::MAX as i64 => Ok(Limit::Capped(n as u32)),
            n => Err(format!("invalid limit {}: expected -1 or a count", n)),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Capped(n) => write!(f, "{}", n),
            Limit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Kinds of resources gated by plan limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Product,
    Portfolio,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Product, ResourceKind::Portfolio];

    /// Table holding rows of this kind.
    pub const fn table(&self) -> &'static str {
        match self {
            ResourceKind::Product => "products",
            ResourceKind::Portfolio => "portfolios",
        }
    }

    /// Human label used in user-facing messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ResourceKind::Product => "Product",
            ResourceKind::Portfolio => "Portfolio",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Product => f.write_str("product"),
            ResourceKind::Portfolio => f.write_str("portfolio"),
        }
    }
}

/// Per-resource limits of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TierLimits {
    #[ts(type = "number")]
    pub products: Limit,
    #[ts(type = "number")]
    pub portfolios: Limit,
}

impl TierLimits {
    /// Returns the limit for a resource kind.
    #[inline]
    pub const fn for_kind(&self, kind: ResourceKind) -> Limit {
        match kind {
            ResourceKind::Product => self.products,
            ResourceKind::Portfolio => self.portfolios,
        }
    }
}

/// A resolved plan: which track, which tier, which limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub pricing_model: PricingModel,
    pub tier_name: &'static str,
    pub limits: TierLimits,
}

// =============================================================================
// Entitlement Result
// =============================================================================

/// Whether a user may create one more resource of a kind.
///
/// Computed fresh per request, never persisted. When the limit is unlimited
/// `current_count` is a placeholder 0: the count query is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    pub can_create: bool,
    #[ts(type = "number")]
    pub limit: Limit,
    #[ts(type = "number")]
    pub current_count: i64,
}

// =============================================================================
// Fees
// =============================================================================

/// Who pays the fees on top of the gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FeeAbsorption {
    /// Fees come out of the amount: `total == subtotal`.
    Creator,
    /// Fees are added on top: `total == subtotal + total_fees`.
    Buyer,
}

impl Default for FeeAbsorption {
    fn default() -> Self {
        FeeAbsorption::Creator
    }
}

/// How a gross amount splits between platform, processor and creator.
///
/// All values are in minor units of `currency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub currency: Currency,
    pub subtotal: Money,
    pub platform_fee: Money,
    pub payment_processing_fee: Money,
    pub total_fees: Money,
    pub creator_payout: Money,
    /// What the buyer is charged.
    pub total: Money,
    pub absorption: FeeAbsorption,
}

// =============================================================================
// Unit Tests
// =============================================================================
