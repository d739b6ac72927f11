//! # Validation Module
//!
//! Input validation for the entitlement and fee endpoints.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React)                                             │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (Postgres)                                          │
//! │  └── NOT NULL / CHECK / FK constraints                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, BPS_SCALE};
use crate::{MAX_AMOUNT_MINOR, MAX_DESCRIPTION_LEN, MAX_MESSAGE_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or portfolio title.
///
/// ## Example
/// ```rust
/// use blinno_core::validation::validate_title;
///
/// assert!(validate_title("Handwoven basket").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates an optional long-form description.
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        }),
        _ => Ok(()),
    }
}

/// Validates the optional note a supporter attaches to a tip.
pub fn validate_tip_message(message: Option<&str>) -> ValidationResult<()> {
    match message {
        Some(m) if m.chars().count() > MAX_MESSAGE_LEN => Err(ValidationError::TooLong {
            field: "message".to_string(),
            max: MAX_MESSAGE_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tip or order amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_AMOUNT_MINOR
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount.minor() > MAX_AMOUNT_MINOR {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_AMOUNT_MINOR,
        });
    }

    Ok(())
}

/// Validates a listing price in minor units. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use blinno_core::validation::validate_price_minor;
///
/// assert!(validate_price_minor(1099).is_ok());
/// assert!(validate_price_minor(0).is_ok());
/// assert!(validate_price_minor(-100).is_err());
/// ```
pub fn validate_price_minor(minor: i64) -> ValidationResult<()> {
    if !(0..=MAX_AMOUNT_MINOR).contains(&minor) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_AMOUNT_MINOR,
        });
    }

    Ok(())
}

/// Validates a rate in basis points (0% to 100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_SCALE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Parses a UUID string.
///
/// ## Example
/// ```rust
/// use blinno_core::validation::parse_uuid;
///
/// assert!(parse_uuid("creator_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_uuid("creator_id", "not-a-uuid").is_err());
/// ```
pub fn parse_uuid(field: &str, id: &str) -> ValidationResult<uuid::Uuid> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Lake Malawi photo series").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("short")).is_ok());
        assert!(validate_description(Some(&"x".repeat(MAX_DESCRIPTION_LEN + 1))).is_err());
    }

    #[test]
    fn test_validate_tip_message() {
        assert!(validate_tip_message(Some("thanks for the mixtape")).is_ok());
        assert!(validate_tip_message(Some(&"x".repeat(MAX_MESSAGE_LEN + 1))).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::from_minor(1)).is_ok());
        assert!(validate_amount(Money::from_minor(MAX_AMOUNT_MINOR)).is_ok());

        assert!(validate_amount(Money::zero()).is_err());
        assert!(validate_amount(Money::from_minor(-5)).is_err());
        assert!(validate_amount(Money::from_minor(MAX_AMOUNT_MINOR + 1)).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("rate", 0).is_ok());
        assert!(validate_rate_bps("rate", 10_000).is_ok());
        assert!(validate_rate_bps("rate", 10_001).is_err());
    }

    #[test]
    fn test_parse_uuid() {
        let id = parse_uuid("id", " 550e8400-e29b-41d4-a716-446655440000 ").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        assert!(matches!(parse_uuid("id", ""), Err(ValidationError::Required { .. })));
        assert!(matches!(parse_uuid("id", "123"), Err(ValidationError::InvalidFormat { .. })));
    }
}
