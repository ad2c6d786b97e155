//! # venue-checkout: Checkout Layer for the Venue Back Office
//!
//! Wires the pure quotation engine from `venue-core` to configuration,
//! visit storage and payment recording.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Architecture                             │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │  PricingConfig   │        │          CheckoutService             │  │
//! │  │                  │        │                                      │  │
//! │  │ defaults         │ tariff │  preview(visit, as_of) ─► Quote      │  │
//! │  │ + pricing.toml   ├───────►│  confirm(visit, as_of, tender)       │  │
//! │  │ + VENUE_* env    │        │        ─► PaymentRecord              │  │
//! │  └──────────────────┘        └───────┬──────────────┬───────────────┘  │
//! │                                      │              │                   │
//! │               ┌──────────────────────┘              └──────────┐        │
//! │               ▼                                                ▼        │
//! │  ┌────────────────────────┐                     ┌────────────────────┐ │
//! │  │     TariffHandle       │                     │ VisitStore         │ │
//! │  │                        │                     │ PaymentStore       │ │
//! │  │ Arc<QuoteEngine>       │                     │                    │ │
//! │  │ swapped whole on       │                     │ MemoryStore for    │ │
//! │  │ tariff change          │                     │ tests and the CLI  │ │
//! │  └────────────────────────┘                     └────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`]: Layered pricing configuration
//! - [`tariff`]: Shared, replaceable quotation engine
//! - [`store`]: Visit and payment store traits plus an in-memory store
//! - [`checkout`]: Preview and confirm
//! - [`error`]: Error types

pub mod checkout;
pub mod config;
pub mod error;
pub mod store;
pub mod tariff;

pub use checkout::{CheckoutPreview, CheckoutService, Tender};
pub use config::{PricingConfig, VenueSettings};
pub use error::{CheckoutError, CheckoutResult};
pub use store::{MemoryStore, PaymentStore, VisitStore};
pub use tariff::TariffHandle;
