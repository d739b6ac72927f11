//! # Money Module
//!
//! Provides the `Money`, `Currency` and `Rate` types for fee arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    100 * 0.029 + 0.30 = 3.1999999999999997  ❌                           │
//! │                                                                         │
//! │  Repeated across thousands of tips the platform ledger drifts away     │
//! │  from what was actually paid out.                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    10000 minor × 290 bps = 290 minor, + 30 flat = 320 minor            │
//! │    Every split is exact, and rounding happens exactly once per fee     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use blinno_core::money::{Money, Rate};
//!
//! let tip = Money::from_minor(10_000);          // 100.00
//! let fee = tip.apply_rate(Rate::from_bps(500)); // 5%
//! assert_eq!(fee.minor(), 500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Basis points in 100%.
pub const BPS_SCALE: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of its currency (cents for USD).
///
/// `Money` carries no currency of its own; the currency travels alongside it
/// in [`FeeBreakdown`](crate::types::FeeBreakdown) and friends. Arithmetic
/// between two values is only meaningful within one currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds and reversals can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use blinno_core::money::Money;
    ///
    /// let tip = Money::from_minor(1099); // 10.99
    /// assert_eq!(tip.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units (e.g. 100 dollars).
    ///
    /// Uses the currency exponent, so `from_major(100, Currency::Jpy)` is
    /// 100 yen, not 10000.
    #[inline]
    pub const fn from_major(major: i64, currency: Currency) -> Self {
        Money(major * currency.minor_per_major())
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a rate and rounds half away from zero to the nearest minor unit.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000` for positive
    /// amounts, mirrored for negative ones.
    ///
    /// ## Example
    /// ```rust
    /// use blinno_core::money::{Money, Rate};
    ///
    /// // 10.00 × 8.25% = 0.825 → 0.83
    /// let fee = Money::from_minor(1000).apply_rate(Rate::from_bps(825));
    /// assert_eq!(fee.minor(), 83);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let scale = BPS_SCALE as i128;
        let product = self.0 as i128 * rate.bps() as i128;
        let half = scale / 2;
        let rounded = if product >= 0 {
            (product + half) / scale
        } else {
            (product - half) / scale
        };
        Money(rounded as i64)
    }

    /// Returns the smaller of two values.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamps negative values to zero.
    #[inline]
    pub const fn non_negative(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Formats the value with the currency's code and exponent.
    ///
    /// ## Example
    /// ```rust
    /// use blinno_core::money::{Currency, Money};
    ///
    /// assert_eq!(Money::from_minor(1099).display(Currency::Usd), "USD 10.99");
    /// assert_eq!(Money::from_minor(1500).display(Currency::Jpy), "JPY 1500");
    /// ```
    pub fn display(&self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        match currency.exponent() {
            0 => format!("{} {}{}", currency.code(), sign, abs),
            exp => {
                let per_major = currency.minor_per_major() as u64;
                format!(
                    "{} {}{}.{:0width$}",
                    currency.code(),
                    sign,
                    abs / per_major,
                    abs % per_major,
                    width = exp as usize
                )
            }
        }
    }
}

/// Debug-friendly display without a currency (two-decimal assumption).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate in basis points (1 bps = 0.01%).
///
/// 500 bps = 5.00%, 290 bps = 2.90%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Currencies BLINNO accepts for tips and orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    /// Malawian kwacha.
    Mwk,
    Zar,
    Kes,
    Ngn,
    /// Zero-decimal currency.
    Jpy,
}

impl Currency {
    /// All supported currencies, in code order.
    pub const ALL: [Currency; 8] = [
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Kes,
        Currency::Mwk,
        Currency::Ngn,
        Currency::Usd,
        Currency::Zar,
    ];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Mwk => "MWK",
            Currency::Zar => "ZAR",
            Currency::Kes => "KES",
            Currency::Ngn => "NGN",
            Currency::Jpy => "JPY",
        }
    }

    /// Number of minor-unit decimal places.
    pub const fn exponent(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Minor units in one major unit (100 for cents, 1 for yen).
    pub const fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.exponent())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_respects_exponent() {
        assert_eq!(Money::from_major(100, Currency::Usd).minor(), 10_000);
        assert_eq!(Money::from_major(100, Currency::Jpy).minor(), 100);
    }

    #[test]
    fn test_display_with_currency() {
        assert_eq!(Money::from_minor(1099).display(Currency::Usd), "USD 10.99");
        assert_eq!(Money::from_minor(5).display(Currency::Mwk), "MWK 0.05");
        assert_eq!(Money::from_minor(-550).display(Currency::Eur), "EUR -5.50");
        assert_eq!(Money::from_minor(1500).display(Currency::Jpy), "JPY 1500");
    }

    #[test]
    fn test_display_plain() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);

        let mut c = a;
        c -= b;
        c += Money::from_minor(1);
        assert_eq!(c.minor(), 501);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 10.00 at 8.25% = 0.825 → 0.83
        assert_eq!(Money::from_minor(1000).apply_rate(Rate::from_bps(825)).minor(), 83);
        // 0.10 at 5% = 0.005 → 0.01
        assert_eq!(Money::from_minor(10).apply_rate(Rate::from_bps(500)).minor(), 1);
        // 0.09 at 5% = 0.0045 → 0.00
        assert_eq!(Money::from_minor(9).apply_rate(Rate::from_bps(500)).minor(), 0);
    }

    #[test]
    fn test_apply_rate_negative_is_symmetric() {
        let fee = Money::from_minor(-1000).apply_rate(Rate::from_bps(825));
        assert_eq!(fee.minor(), -83);
    }

    #[test]
    fn test_apply_rate_does_not_overflow() {
        let big = Money::from_minor(i64::MAX / 2);
        let fee = big.apply_rate(Rate::from_bps(BPS_SCALE));
        assert_eq!(fee, big);
    }

    #[test]
    fn test_min_and_non_negative() {
        let a = Money::from_minor(30);
        let b = Money::from_minor(12);
        assert_eq!(a.min(b), b);
        assert_eq!(Money::from_minor(-4).non_negative(), Money::zero());
        assert_eq!(a.non_negative(), a);
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" MWK ".parse::<Currency>().unwrap(), Currency::Mwk);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_serde_uses_codes() {
        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: Currency = serde_json::from_str("\"KES\"").unwrap();
        assert_eq!(back, Currency::Kes);
    }

    #[test]
    fn test_money_exports_as_plain_number() {
        assert_eq!(Money::inline(), "number");
        assert_eq!(serde_json::to_string(&Money::from_minor(320)).unwrap(), "320");
    }
}
