//! # Tariff Handle
//!
//! Shares the active quotation engine across checkout requests.
//!
//! ## Thread Safety
//! The engine is immutable, so readers clone an `Arc` snapshot and release
//! the lock immediately. A tariff change builds a complete new engine and
//! swaps the pointer, so a quote never sees half of an old table and half of
//! a new one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tariff Replacement                                   │
//! │                                                                         │
//! │  quote() ──► engine() ──► Arc<QuoteEngine> (v1) ──► price session      │
//! │                                                                         │
//! │  replace(tariff v2)                                                     │
//! │    1. validate v2 (complete, consistent)   ── reject: v1 stays active  │
//! │    2. build QuoteEngine v2                                              │
//! │    3. write lock, swap pointer, unlock                                  │
//! │                                                                         │
//! │  In-flight quotes keep their v1 snapshot until they finish.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use venue_core::{Quote, QuoteEngine, QuoteResult, SessionInput, Tariff};

use crate::error::CheckoutResult;

/// Shared, replaceable quotation engine.
#[derive(Debug, Clone)]
pub struct TariffHandle {
    engine: Arc<RwLock<Arc<QuoteEngine>>>,
}

impl TariffHandle {
    /// Wraps an already-validated engine.
    pub fn new(engine: QuoteEngine) -> Self {
        TariffHandle {
            engine: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Validates a tariff and wraps it.
    pub fn from_tariff(tariff: Tariff) -> CheckoutResult<Self> {
        tariff.validate_complete()?;
        Ok(Self::new(QuoteEngine::new(tariff)?))
    }

    /// Returns a snapshot of the active engine.
    pub fn engine(&self) -> Arc<QuoteEngine> {
        // The guarded value is a single pointer, so a poisoned lock still holds a whole engine.
        let guard = self.engine.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Prices a session against the active engine.
    pub fn quote(&self, input: &SessionInput) -> QuoteResult<Quote> {
        self.engine().quote(input)
    }

    /// Replaces the active tariff.
    ///
    /// On error the previous tariff stays active.
    pub fn replace(&self, tariff: Tariff) -> CheckoutResult<()> {
        tariff.validate_complete()?;
        let next = Arc::new(QuoteEngine::new(tariff)?);

        let mut guard = self.engine.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        drop(guard);

        info!(
            service_tax = %self.engine().tariff().service_tax,
            "Tariff replaced"
        );
        Ok(())
    }
}

impl Default for TariffHandle {
    fn default() -> Self {
        Self::new(QuoteEngine::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use venue_core::{AddOns, Money, PlanId, TaxRate};

    fn bar_session(minutes: i64) -> SessionInput {
        let start = Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap();
        SessionInput {
            plan: PlanId::Bar,
            start_at: start,
            end_at: start + Duration::minutes(minutes),
            add_ons: AddOns::default(),
        }
    }

    #[test]
    fn test_default_handle_uses_house_tariff() {
        let handle = TariffHandle::default();
        assert_eq!(handle.quote(&bar_session(95)).unwrap().total.yen(), 4800);
    }

    #[test]
    fn test_replace_swaps_for_new_quotes_only() {
        let handle = TariffHandle::default();
        let before = handle.engine();

        let mut tariff = Tariff::standard();
        tariff.service_tax = TaxRate::from_bps(1000);
        handle.replace(tariff).unwrap();

        assert_eq!(before.quote(&bar_session(90)).unwrap().total.yen(), 3600);
        assert_eq!(handle.quote(&bar_session(90)).unwrap().total.yen(), 3300);
    }

    #[test]
    fn test_rejected_replacement_keeps_previous_tariff() {
        let handle = TariffHandle::default();

        let mut incomplete = Tariff::standard();
        incomplete.plans.retain(|p| p.plan != PlanId::Counter);
        let err = handle.replace(incomplete).unwrap_err();
        assert!(err.is_config_error());

        let mut negative = Tariff::standard();
        negative.surcharges.house_fee = Money::from_yen(-1);
        assert!(handle.replace(negative).is_err());

        assert_eq!(*handle.engine(), QuoteEngine::standard());
    }

    #[test]
    fn test_clones_share_the_engine() {
        let handle = TariffHandle::default();
        let other = handle.clone();

        let mut tariff = Tariff::standard();
        tariff.service_tax = TaxRate::zero();
        handle.replace(tariff).unwrap();

        assert_eq!(other.quote(&bar_session(90)).unwrap().total.yen(), 3000);
    }
}
