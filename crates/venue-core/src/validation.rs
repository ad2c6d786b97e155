//! # Validation Module
//!
//! Input validation utilities for the venue back office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Edge (CLI / checkout UI)                                     │
//! │  ├── Parsing: plan identifiers, timestamps, payment methods            │
//! │  └── Unknown values rejected, never coerced                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Time range, money amounts, identifiers, notes                     │
//! │  └── Returns ValidationError (→ QuoteError::InvalidInput)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Tariff validation (plan.rs)                                  │
//! │  └── Configuration bugs, reported as configuration errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use venue_core::validation::{validate_payment_amount, validate_uuid};
//! use venue_core::Money;
//!
//! validate_payment_amount(Money::from_yen(3600)).unwrap();
//! assert!(validate_uuid("not-a-uuid").is_err());
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NOTES_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Time Validators
// =============================================================================

/// Validates a session's time range.
///
/// ## Rules
/// - `end_at` must not be before `start_at`
/// - Equal timestamps are a valid zero-length session
pub fn validate_time_range(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> ValidationResult<()> {
    if end_at < start_at {
        return Err(ValidationError::EndBeforeStart {
            start: start_at.to_rfc3339(),
            end: end_at.to_rfc3339(),
        });
    }

    Ok(())
}

/// Parses an RFC 3339 / ISO-8601 timestamp and normalizes it to UTC.
///
/// ## Example
/// ```rust
/// use venue_core::validation::parse_timestamp;
///
/// let t = parse_timestamp("start", "2026-04-01T21:00:00+09:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2026-04-01T12:00:00+00:00");
/// assert!(parse_timestamp("start", "yesterday").is_err());
/// ```
pub fn parse_timestamp(field: &str, raw: &str) -> ValidationResult<DateTime<Utc>> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Converts a caller-supplied pass-through amount (drinks) to `Money`.
///
/// ## Rules
/// - Must fit in the signed money representation
pub fn validate_pass_through(field: &str, yen: u64) -> ValidationResult<Money> {
    i64::try_from(yen)
        .map(Money::from_yen)
        .map_err(|_| ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        })
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Cannot pay zero or negative amounts
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "service_tax".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates free-text payment notes.
///
/// ## Rules
/// - Empty or whitespace-only notes become `None`
/// - At most `MAX_NOTES_LEN` characters
///
/// ## Returns
/// The trimmed notes, if any.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(Some(notes.to_string()))
}

/// Validates a visit identifier.
///
/// ## Rules
/// - Must not be empty
/// - No leading or trailing whitespace (ids are looked up verbatim)
/// - At most 64 characters
pub fn validate_visit_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "visit_id".to_string(),
        });
    }

    if id.trim() != id {
        return Err(ValidationError::InvalidFormat {
            field: "visit_id".to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "visit_id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use venue_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
