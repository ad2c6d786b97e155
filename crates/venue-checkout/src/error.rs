//! # Checkout Error Types
//!
//! Error types for configuration loading and the checkout flow.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Pricing      │  │     Tender              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Quote          │  │  InsufficientCash       │ │
//! │  │  ConfigLoad...  │  │  Validation     │  │  QuoteChanged           │ │
//! │  │  ConfigSave...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │     Visits      │  │    Storage      │                              │
//! │  │                 │  │                 │                              │
//! │  │  VisitNotFound  │  │  Unavailable    │  ← only retryable kind       │
//! │  │  AlreadySettled │  │  StorageFailed  │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use venue_core::{Money, QuoteError, ValidationError};

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Checkout error type covering configuration, pricing and storage failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid pricing configuration.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// The quotation engine refused the session.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Checkout input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Visit Errors
    // =========================================================================
    /// No visit with this identifier.
    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    /// A payment has already been recorded for the visit.
    #[error("Visit {0} is already settled")]
    AlreadySettled(String),

    // =========================================================================
    // Tender Errors
    // =========================================================================
    /// Cash handed over does not cover the total.
    #[error("Cash received {received} does not cover total {total}")]
    InsufficientCash { total: Money, received: Money },

    /// The total changed between the preview staff confirmed and now.
    #[error("Quote total changed from {expected} to {actual}; re-confirm with the guest")]
    QuoteChanged { expected: Money, actual: Money },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// The storage collaborator could not be reached.
    ///
    /// Returned by `VisitStore` / `PaymentStore` implementations for
    /// transient backend failures.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The storage collaborator rejected the operation.
    #[error("Storage error: {0}")]
    StorageFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for CheckoutError {
    fn from(err: std::io::Error) -> Self {
        CheckoutError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CheckoutError {
    fn from(err: toml::de::Error) -> Self {
        CheckoutError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CheckoutError {
    fn from(err: toml::ser::Error) -> Self {
        CheckoutError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CheckoutError {
    /// Returns true if the operation can be retried as-is.
    ///
    /// Pricing is pure, so only reaching the storage collaborators can fail
    /// transiently.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::StorageUnavailable(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        match self {
            CheckoutError::InvalidConfig(_)
            | CheckoutError::ConfigLoadFailed(_)
            | CheckoutError::ConfigSaveFailed(_) => true,
            CheckoutError::Quote(err) => err.is_configuration(),
            _ => false,
        }
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            CheckoutError::Validation(_)
            | CheckoutError::InsufficientCash { .. }
            | CheckoutError::QuoteChanged { .. } => true,
            CheckoutError::Quote(err) => err.is_invalid_input(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venue_core::PlanId;

    #[test]
    fn test_retryable_errors() {
        assert!(CheckoutError::StorageUnavailable("timeout".into()).is_retryable());

        assert!(!CheckoutError::StorageFailed("duplicate id".into()).is_retryable());
        assert!(!CheckoutError::VisitNotFound("v-1".into()).is_retryable());
        assert!(!CheckoutError::Quote(QuoteError::MissingPlan(PlanId::Bar)).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(CheckoutError::InvalidConfig("bad".into()).is_config_error());
        assert!(CheckoutError::Quote(QuoteError::MissingPlan(PlanId::VipA)).is_config_error());

        let input_err: CheckoutError = QuoteError::InvalidInput(ValidationError::Required {
            field: "plan".into(),
        })
        .into();
        assert!(!input_err.is_config_error());
        assert!(input_err.is_invalid_input());
    }

    #[test]
    fn test_error_display() {
        let err = CheckoutError::InsufficientCash {
            total: Money::from_yen(4800),
            received: Money::from_yen(3000),
        };
        assert_eq!(
            err.to_string(),
            "Cash received ¥3,000 does not cover total ¥4,800"
        );

        let err: CheckoutError = QuoteError::MissingPlan(PlanId::VipB).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: no tariff entry for plan VIP_B"
        );
    }
}
