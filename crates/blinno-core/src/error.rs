//! # Error Types
//!
//! Domain-specific error types for blinno-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  blinno-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule outcomes                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  blinno-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  blinno-api errors (in app)                                            │
//! │  └── ApiError         - What the frontend sees (JSON + status)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures during entitlement checks are deliberately NOT errors
//! here; they are absorbed by the service layer (fail-open).

use thiserror::Error;

use crate::types::{Limit, ResourceKind};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The user's plan does not allow another resource of this kind.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /api/products
    ///      │
    ///      ▼
    /// check_limit(product): limit=5, count=5
    ///      │
    ///      ▼
    /// LimitReached { kind: Product, limit: 5 }
    ///      │
    ///      ▼
    /// 403 "Product limit reached (5). Upgrade your plan to create more."
    /// ```
    #[error("{} limit reached ({limit}). Upgrade your plan to create more.", kind.label())]
    LimitReached { kind: ResourceKind, limit: Limit },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
