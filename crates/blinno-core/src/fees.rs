//! # Fee Calculator
//!
//! Splits a gross tip or order amount into platform fee, payment-processing
//! fee and creator payout.
//!
//! ## Fee Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tip: USD 100.00, creator absorbs fees                                  │
//! │                                                                         │
//! │  subtotal                       10000                                   │
//! │  platform fee      5.00%   ──►    500                                   │
//! │  processing fee    2.90% + 30 ──► 320                                   │
//! │  ─────────────────────────────────────                                  │
//! │  creator payout                  9180   (10000 - 500 - 320)             │
//! │  total charged                  10000                                   │
//! │                                                                         │
//! │  platform + processing + payout == subtotal, always, to the minor unit │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every fee is rounded once, half-up, in integer minor units. The payout is
//! whatever remains, so nothing can leak between the parts.
//!
//! The constants live in [`FeeSchedule`], loaded from configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::money::{Currency, Money, Rate, BPS_SCALE};
use crate::types::{FeeAbsorption, FeeBreakdown, PercentageTier, PricingModel, TierInfo};
use crate::validation::{validate_amount, validate_rate_bps, ValidationResult};

// =============================================================================
// Fee Schedule
// =============================================================================

/// Fee constants for tips and orders.
///
/// ## TOML Format
/// ```toml
/// platform_fee_bps = 500      # 5.00%
/// processing_fee_bps = 290    # 2.90%
/// absorption = "creator"      # creator | buyer
///
/// [flat_fees]                 # minor units, per currency
/// USD = 30
/// EUR = 30
///
/// [commission_bps]            # per-order commission for percentage tiers
/// basic = 1000
/// premium = 700
/// pro = 500
/// ```
/// Missing keys keep their defaults; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeeSchedule {
    /// Platform commission on tips.
    pub platform_fee_bps: u32,
    /// Percentage part of the payment processor's fee.
    pub processing_fee_bps: u32,
    /// Fixed part of the processor's fee, in minor units per currency.
    /// Currencies absent from the map pay no flat fee.
    pub flat_fees: BTreeMap<Currency, i64>,
    /// Who pays the fees.
    pub absorption: FeeAbsorption,
    /// Order commission for sellers on the percentage track.
    pub commission_bps: BTreeMap<PercentageTier, u32>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            platform_fee_bps: 500,
            processing_fee_bps: 290,
            flat_fees: [(Currency::Usd, 30), (Currency::Eur, 30), (Currency::Gbp, 30)]
                .into_iter()
                .collect(),
            absorption: FeeAbsorption::Creator,
            commission_bps: [
                (PercentageTier::Basic, 1000),
                (PercentageTier::Premium, 700),
                (PercentageTier::Pro, 500),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl FeeSchedule {
    /// Checks that every rate is within 0..=100% and flat fees are not negative.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate_bps("platform_fee_bps", self.platform_fee_bps)?;
        validate_rate_bps("processing_fee_bps", self.processing_fee_bps)?;

        for (tier, bps) in &self.commission_bps {
            validate_rate_bps(&format!("commission_bps.{}", tier.name()), *bps)?;
        }

        for (currency, flat) in &self.flat_fees {
            if *flat < 0 {
                return Err(ValidationError::OutOfRange {
                    field: format!("flat_fees.{}", currency.code()),
                    min: 0,
                    max: i64::MAX,
                });
            }
        }

        Ok(())
    }

    #[inline]
    pub fn platform_rate(&self) -> Rate {
        Rate::from_bps(self.platform_fee_bps)
    }

    #[inline]
    pub fn processing_rate(&self) -> Rate {
        Rate::from_bps(self.processing_fee_bps)
    }

    /// Flat processing fee for a currency (zero when not configured).
    pub fn flat_fee(&self, currency: Currency) -> Money {
        Money::from_minor(self.flat_fees.get(&currency).copied().unwrap_or(0))
    }

    /// Order commission for a resolved tier.
    ///
    /// Subscription sellers already pay a recurring fee and owe no
    /// per-order commission. Percentage sellers pay their tier's rate; a
    /// tier missing from the schedule pays the platform tip rate.
    pub fn order_commission(&self, tier: &TierInfo) -> Rate {
        match tier.pricing_model {
            PricingModel::Subscription => Rate::zero(),
            PricingModel::Percentage => PercentageTier::from_name(tier.tier_name)
                .and_then(|t| self.commission_bps.get(&t).copied())
                .map(Rate::from_bps)
                .unwrap_or_else(|| self.platform_rate()),
        }
    }
}

// =============================================================================
// Calculations
// =============================================================================

/// Computes the fee breakdown for a tip.
///
/// ## Errors
/// `amount` must be positive.
///
/// ## Example
/// ```rust
/// use blinno_core::fees::{calculate_tip_fee, FeeSchedule};
/// use blinno_core::money::{Currency, Money};
///
/// let schedule = FeeSchedule::default();
/// let fees = calculate_tip_fee(Money::from_minor(10_000), Currency::Usd, &schedule).unwrap();
///
/// assert_eq!(fees.platform_fee.minor(), 500);
/// assert_eq!(fees.payment_processing_fee.minor(), 320);
/// assert_eq!(fees.creator_payout.minor(), 9_180);
/// ```
pub fn calculate_tip_fee(
    amount: Money,
    currency: Currency,
    schedule: &FeeSchedule,
) -> ValidationResult<FeeBreakdown> {
    validate_amount(amount)?;
    Ok(split(amount, currency, schedule.platform_rate(), schedule))
}

/// Computes the fee breakdown for an order sold by a seller on `tier`.
///
/// Same structure as [`calculate_tip_fee`]; only the platform rate differs
/// (see [`FeeSchedule::order_commission`]).
pub fn calculate_order_fee(
    amount: Money,
    currency: Currency,
    tier: &TierInfo,
    schedule: &FeeSchedule,
) -> ValidationResult<FeeBreakdown> {
    validate_amount(amount)?;
    Ok(split(amount, currency, schedule.order_commission(tier), schedule))
}

fn split(amount: Money, currency: Currency, platform_rate: Rate, schedule: &FeeSchedule) -> FeeBreakdown {
    debug_assert!(platform_rate.bps() <= BPS_SCALE);

    let mut platform_fee = amount.apply_rate(platform_rate);
    let mut processing_fee = amount.apply_rate(schedule.processing_rate()) + schedule.flat_fee(currency);

    let (creator_payout, total) = match schedule.absorption {
        FeeAbsorption::Creator => {
            // Fees never exceed the amount; the flat fee is what usually
            // overshoots on tiny tips, so processing gives way first.
            platform_fee = platform_fee.min(amount);
            processing_fee = processing_fee.min(amount - platform_fee);
            (amount - platform_fee - processing_fee, amount)
        }
        FeeAbsorption::Buyer => (amount, amount + platform_fee + processing_fee),
    };

    FeeBreakdown {
        currency,
        subtotal: amount,
        platform_fee,
        payment_processing_fee: processing_fee,
        total_fees: platform_fee + processing_fee,
        creator_payout,
        total,
        absorption: schedule.absorption,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
