//! # venue-core: Pure Session Pricing for the Venue Back Office
//!
//! This crate is the **financial source of truth** of the back office. Every
//! invoice, daily-closing figure and delegated checkout is priced here, as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Venue Back Office Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Checkout UI / Delegated Checkout / CLI             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 venue-checkout (service layer)                  │   │
//! │  │   load visit ──► quote ──► staff confirms ──► record payment    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ venue-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   plan    │  │   quote   │  │   │
//! │  │   │ Session   │  │   Money   │  │  Tariff   │  │  Engine   │  │   │
//! │  │   │ Quote     │  │  TaxCalc  │  │  Tracks   │  │  Blocks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • NO FLOATS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Session input, add-ons, line items, quotes, visits, payments
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`plan`] - Plan definitions, billing tracks and the tariff table
//! - [`quote`] - The quotation engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use venue_core::{AddOns, PlanId, QuoteEngine, SessionInput};
//!
//! let engine = QuoteEngine::standard();
//! let start = Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap();
//!
//! let input = SessionInput {
//!     plan: PlanId::Bar,
//!     start_at: start,
//!     end_at: start + Duration::minutes(95),
//!     add_ons: AddOns::default(),
//! };
//!
//! let quote = engine.quote(&input).unwrap();
//! assert_eq!(quote.subtotal.yen(), 4000);
//! assert_eq!(quote.service_tax.yen(), 800);
//! assert_eq!(quote.total.yen(), 4800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod plan;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ErrorKind, QuoteError, QuoteResult, ValidationError};
pub use money::Money;
pub use plan::{BillingTrack, PlanDefinition, Surcharges, Tariff};
pub use quote::QuoteEngine;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Service tax applied to every quote by the standard tariff, in basis points.
///
/// 2000 bps = 20%.
pub const STANDARD_SERVICE_TAX_BPS: u32 = 2000;

/// Maximum length of free-text notes attached to a payment record.
pub const MAX_NOTES_LEN: usize = 500;
