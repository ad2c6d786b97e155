//! # Error Types
//!
//! Domain-specific error types for venue-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  venue-core errors (this file)                                         │
//! │  ├── QuoteError       - What the quotation engine returns              │
//! │  │   ├── InvalidInput      (caller mistake)                            │
//! │  │   ├── MissingPlan       (configuration bug)                         │
//! │  │   └── InvalidPlanConfig (configuration bug)                         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  venue-checkout errors (separate crate)                                │
//! │  └── CheckoutError    - Config, storage and tender failures            │
//! │                                                                         │
//! │  Flow: ValidationError → QuoteError → CheckoutError → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A wrong invoice is worse than a loud failure: no error here is ever turned
//! into a zero-amount quote.

use thiserror::Error;

use crate::types::PlanId;

// =============================================================================
// Quote Error
// =============================================================================

/// Failures of the quotation engine.
///
/// Every variant falls into exactly one [`ErrorKind`]. None of them is
/// transient, so nothing here is worth retrying.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The caller supplied a session that cannot be priced.
    ///
    /// ## When This Occurs
    /// - `end_at` is before `start_at`
    /// - Plan identifier is not one of the known plans
    /// - An amount does not fit in the money representation
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The tariff has no entry for a plan that exists in the enumeration.
    #[error("Configuration error: no tariff entry for plan {0}")]
    MissingPlan(PlanId),

    /// A tariff entry is malformed (zero unit size, negative price, ...).
    #[error("Configuration error: plan {plan}: {reason}")]
    InvalidPlanConfig { plan: PlanId, reason: String },

    /// A tariff-wide setting is malformed (tax rate, surcharge price).
    #[error("Configuration error: {0}")]
    InvalidTariff(String),
}

/// The two recognized failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller error: fix the input.
    InvalidInput,
    /// Deployment error: fix the tariff.
    Configuration,
}

impl QuoteError {
    /// Creates a plan configuration error.
    pub fn plan_config(plan: PlanId, reason: impl Into<String>) -> Self {
        QuoteError::InvalidPlanConfig {
            plan,
            reason: reason.into(),
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::InvalidInput(_) => ErrorKind::InvalidInput,
            QuoteError::MissingPlan(_)
            | QuoteError::InvalidPlanConfig { .. }
            | QuoteError::InvalidTariff(_) => ErrorKind::Configuration,
        }
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// Returns true if the tariff itself is broken.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any pricing runs.
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

    /// Invalid format (e.g., invalid UUID, invalid timestamp).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Session ends before it starts.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with QuoteError.
pub type QuoteResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QuoteError::plan_config(PlanId::Bar, "extension unit must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: plan BAR: extension unit must be positive"
        );

        let err = QuoteError::MissingPlan(PlanId::VipB);
        assert_eq!(
            err.to_string(),
            "Configuration error: no tariff entry for plan VIP_B"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "plan".to_string(),
        };
        assert_eq!(err.to_string(), "plan is required");

        let err = ValidationError::EndBeforeStart {
            start: "2026-04-01T20:00:00Z".to_string(),
            end: "2026-04-01T19:00:00Z".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "end time 2026-04-01T19:00:00Z is before start time 2026-04-01T20:00:00Z"
        );
    }

    #[test]
    fn test_validation_converts_to_invalid_input() {
        let validation_err = ValidationError::Required {
            field: "plan".to_string(),
        };
        let err: QuoteError = validation_err.into();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
        assert!(err.is_invalid_input());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(QuoteError::MissingPlan(PlanId::Bar).kind(), ErrorKind::Configuration);
        assert_eq!(
            QuoteError::InvalidTariff("service tax too high".into()).kind(),
            ErrorKind::Configuration
        );
        assert!(QuoteError::plan_config(PlanId::VipA, "bad").is_configuration());
    }
}
