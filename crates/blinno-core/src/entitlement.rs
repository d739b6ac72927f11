//! # Entitlement Decisions
//!
//! The pure half of a limit check: given the resolved limit and the user's
//! current usage, may they create one more?
//!
//! ```text
//! resolve tier ──► limit ──┬── Unlimited ──► allow, count skipped (0)
//!                          │
//!                          └── Capped(L) ──► count C ──► allow iff C < L
//! ```
//!
//! The I/O half (fetching the subscription and counting rows) lives in the
//! API service layer; it calls into these functions.

use crate::types::{EntitlementResult, Limit};

/// Result for an unlimited tier. The count query is never issued, so
/// `current_count` is a placeholder 0.
#[inline]
pub const fn unlimited() -> EntitlementResult {
    EntitlementResult {
        can_create: true,
        limit: Limit::Unlimited,
        current_count: 0,
    }
}

/// Decides whether one more resource fits under `limit`.
///
/// Strict `<`: a user exactly at the limit is denied.
pub fn evaluate(limit: Limit, current_count: i64) -> EntitlementResult {
    let can_create = match limit {
        Limit::Unlimited => true,
        Limit::Capped(cap) => current_count < cap as i64,
    };

    EntitlementResult {
        can_create,
        limit,
        current_count,
    }
}

/// Result used when counting failed: allow, report a zero count.
///
/// Creation is never blocked on an infrastructure error.
#[inline]
pub const fn fail_open(limit: Limit) -> EntitlementResult {
    EntitlementResult {
        can_create: true,
        limit,
        current_count: 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
