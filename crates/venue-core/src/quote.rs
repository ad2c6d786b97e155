//! # Quotation Engine
//!
//! Turns a [`SessionInput`] into a [`Quote`].
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start_at, end_at ──► elapsed minutes (truncated)                       │
//! │                            │                                            │
//! │            ┌───────────────┴───────────────┐                            │
//! │            ▼                               ▼                            │
//! │   set track                        room track (use_room + plan has one) │
//! │   BASE, EXT_SET                    ROOM_BASE, EXT_ROOM                  │
//! │            │                               │                            │
//! │            └───────────────┬───────────────┘                            │
//! │                            ▼                                            │
//! │   NOMINATION · INHOUSE · HOUSE_FEE · SINGLE_CHARGE · DRINK              │
//! │                            │                                            │
//! │                            ▼                                            │
//! │   subtotal ──► service tax (once, whole subtotal) ──► total             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line order in the quote is exactly the order above. The engine holds only
//! its immutable tariff, so one instance can be shared by any number of
//! threads without locking.

use chrono::{DateTime, Utc};

use crate::error::{QuoteResult, ValidationError};
use crate::money::Money;
use crate::plan::{BillingTrack, Tariff};
use crate::types::{LineCode, LineItem, Quote, SessionInput};
use crate::validation::{validate_pass_through, validate_time_range};

// =============================================================================
// Engine
// =============================================================================

/// Prices seating sessions against one tariff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEngine {
    tariff: Tariff,
}

impl QuoteEngine {
    /// Creates an engine, rejecting a malformed tariff up front.
    pub fn new(tariff: Tariff) -> QuoteResult<Self> {
        tariff.validate()?;
        Ok(QuoteEngine { tariff })
    }

    /// Engine over the house tariff.
    pub fn standard() -> Self {
        QuoteEngine {
            tariff: Tariff::standard(),
        }
    }

    /// The tariff this engine prices with.
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Prices one session.
    ///
    /// ## Errors
    /// - `InvalidInput` when `end_at < start_at` or an amount overflows
    /// - `MissingPlan` when the tariff has no entry for the plan
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, TimeZone, Utc};
    /// use venue_core::{AddOns, LineCode, PlanId, QuoteEngine, SessionInput};
    ///
    /// let start = Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap();
    /// let quote = QuoteEngine::standard()
    ///     .quote(&SessionInput {
    ///         plan: PlanId::VipA,
    ///         start_at: start,
    ///         end_at: start + Duration::minutes(140),
    ///         add_ons: AddOns { use_room: true, ..AddOns::default() },
    ///     })
    ///     .unwrap();
    ///
    /// let codes: Vec<_> = quote.lines.iter().map(|l| l.code).collect();
    /// assert_eq!(
    ///     codes,
    ///     [LineCode::Base, LineCode::ExtSet, LineCode::RoomBase, LineCode::ExtRoom]
    /// );
    /// assert_eq!(quote.total.yen(), 50400);
    /// ```
    pub fn quote(&self, input: &SessionInput) -> QuoteResult<Quote> {
        let elapsed = elapsed_minutes(input.start_at, input.end_at)?;
        let definition = self.tariff.require_plan(input.plan)?;
        let add_ons = &input.add_ons;
        let surcharges = &self.tariff.surcharges;

        let mut lines = Lines::default();

        // Set track: always billed.
        lines.push(LineCode::Base, definition.set.base_price, 1)?;
        lines.push_extension(LineCode::ExtSet, &definition.set, elapsed)?;

        // Room track: independent schedule on the same elapsed time.
        if add_ons.use_room {
            if let Some(room) = &definition.room {
                lines.push(LineCode::RoomBase, room.base_price, 1)?;
                lines.push_extension(LineCode::ExtRoom, room, elapsed)?;
            }
        }

        if add_ons.nomination_count > 0 {
            lines.push(
                LineCode::Nomination,
                surcharges.nomination_unit_price,
                i64::from(add_ons.nomination_count),
            )?;
        }
        if add_ons.inhouse_count > 0 {
            lines.push(
                LineCode::Inhouse,
                surcharges.inhouse_unit_price,
                i64::from(add_ons.inhouse_count),
            )?;
        }

        if add_ons.apply_house_fee {
            lines.push(LineCode::HouseFee, surcharges.house_fee, 1)?;
        }
        if add_ons.apply_single_charge {
            lines.push(LineCode::SingleCharge, surcharges.single_charge, 1)?;
        }

        if add_ons.drink_total > 0 {
            let drinks = validate_pass_through("drink_total", add_ons.drink_total)?;
            lines.push(LineCode::Drink, drinks, 1)?;
        }

        let subtotal = lines.subtotal;
        let service_tax = subtotal.calculate_tax(self.tariff.service_tax);
        let total = subtotal
            .checked_add(service_tax)
            .ok_or_else(|| amount_overflow("total"))?;

        Ok(Quote {
            plan: input.plan,
            elapsed_minutes: elapsed,
            lines: lines.items,
            subtotal,
            service_tax,
            total,
        })
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        QuoteEngine::standard()
    }
}

// =============================================================================
// Elapsed Time
// =============================================================================

/// Whole minutes between `start_at` and `end_at`, fractions truncated.
///
/// 89m59s is 89 minutes, not 90.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use venue_core::quote::elapsed_minutes;
///
/// let start = Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap();
/// let end = start + Duration::minutes(89) + Duration::seconds(59);
/// assert_eq!(elapsed_minutes(start, end).unwrap(), 89);
/// assert!(elapsed_minutes(end, start).is_err());
/// ```
pub fn elapsed_minutes(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> QuoteResult<i64> {
    validate_time_range(start_at, end_at)?;
    Ok((end_at - start_at).num_minutes())
}

// =============================================================================
// Line Assembly
// =============================================================================

/// Accumulates line items and a running, overflow-checked subtotal.
#[derive(Default)]
struct Lines {
    items: Vec<LineItem>,
    subtotal: Money,
}

impl Lines {
    fn push(&mut self, code: LineCode, unit_price: Money, quantity: i64) -> QuoteResult<()> {
        let amount = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| amount_overflow(code.as_str()))?;
        self.subtotal = self
            .subtotal
            .checked_add(amount)
            .ok_or_else(|| amount_overflow("subtotal"))?;
        self.items.push(LineItem {
            code,
            unit_price,
            quantity,
            amount,
        });
        Ok(())
    }

    /// One aggregated line for all owed blocks; nothing when none are owed.
    fn push_extension(
        &mut self,
        code: LineCode,
        track: &BillingTrack,
        elapsed: i64,
    ) -> QuoteResult<()> {
        let blocks = track.extension_blocks(elapsed);
        if blocks > 0 {
            self.push(code, track.extension_price, blocks)?;
        }
        Ok(())
    }
}

fn amount_overflow(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::plan::PlanDefinition;
    use crate::types::{AddOns, PlanId, TaxRate};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap()
    }

    fn session(plan: PlanId, minutes: i64, add_ons: AddOns) -> SessionInput {
        SessionInput {
            plan,
            start_at: start(),
            end_at: start() + Duration::minutes(minutes),
            add_ons,
        }
    }

    #[test]
    fn test_zero_duration_is_base_only() {
        let quote = QuoteEngine::standard()
            .quote(&session(PlanId::Counter, 0, AddOns::default()))
            .unwrap();
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].code, LineCode::Base);
        assert_eq!(quote.subtotal.yen(), 8000);
        assert_eq!(quote.elapsed_minutes, 0);
    }

    #[test]
    fn test_truncates_partial_minutes() {
        let engine = QuoteEngine::standard();
        let mut input = session(PlanId::Bar, 90, AddOns::default());
        input.end_at = input.end_at + Duration::seconds(59);
        let quote = engine.quote(&input).unwrap();
        assert_eq!(quote.elapsed_minutes, 90);
        assert!(!quote.has_extension());

        input.end_at = input.end_at + Duration::seconds(1);
        let quote = engine.quote(&input).unwrap();
        assert_eq!(quote.elapsed_minutes, 91);
        assert_eq!(quote.line(LineCode::ExtSet).unwrap().quantity, 1);
    }

    #[test]
    fn test_blocks_are_aggregated_into_one_line() {
        // BAR: 90m base, 30m blocks; 181m → 91m over → 4 blocks
        let quote = QuoteEngine::standard()
            .quote(&session(PlanId::Bar, 181, AddOns::default()))
            .unwrap();
        let ext: Vec<_> = quote.lines.iter().filter(|l| l.code == LineCode::ExtSet).collect();
        assert_eq!(ext.len(), 1);
        assert_eq!(ext[0].quantity, 4);
        assert_eq!(ext[0].amount.yen(), 4000);
    }

    #[test]
    fn test_end_before_start_is_invalid_input() {
        let mut input = session(PlanId::Bar, 0, AddOns::default());
        input.end_at = input.start_at - Duration::seconds(1);
        let err = QuoteEngine::standard().quote(&input).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_plan_is_configuration_error() {
        let mut tariff = Tariff::standard();
        tariff.plans.retain(|p| p.plan != PlanId::VipB);
        let engine = QuoteEngine::new(tariff).unwrap();

        let err = engine
            .quote(&session(PlanId::VipB, 60, AddOns::default()))
            .unwrap_err();
        assert!(matches!(err, QuoteError::MissingPlan(PlanId::VipB)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_engine_rejects_bad_tariff() {
        let mut tariff = Tariff::standard();
        tariff.plans[0].set.extension_unit_minutes = 0;
        let err = QuoteEngine::new(tariff).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_room_ignored_for_plan_without_room_track() {
        let add_ons = AddOns {
            use_room: true,
            ..AddOns::default()
        };
        let quote = QuoteEngine::standard()
            .quote(&session(PlanId::Bar, 200, add_ons))
            .unwrap();
        assert!(!quote.lines.iter().any(|l| l.code.is_room()));
    }

    #[test]
    fn test_room_and_set_tracks_are_independent() {
        // VIP_A set: 120m/30m blocks; room: 120m/60m blocks. At 181m the set
        // track owes 3 blocks while the room track owes 2.
        let add_ons = AddOns {
            use_room: true,
            ..AddOns::default()
        };
        let quote = QuoteEngine::standard()
            .quote(&session(PlanId::VipA, 181, add_ons))
            .unwrap();
        assert_eq!(quote.line(LineCode::ExtSet).unwrap().quantity, 3);
        assert_eq!(quote.line(LineCode::ExtRoom).unwrap().quantity, 2);
        assert_eq!(quote.subtotal.yen(), 12000 + 30000 + 10000 + 20000);
    }

    #[test]
    fn test_counts_become_quantities() {
        let add_ons = AddOns {
            nomination_count: 3,
            inhouse_count: 2,
            ..AddOns::default()
        };
        let quote = QuoteEngine::standard()
            .quote(&session(PlanId::Bar, 60, add_ons))
            .unwrap();
        let nomination = quote.line(LineCode::Nomination).unwrap();
        assert_eq!(nomination.quantity, 3);
        assert_eq!(nomination.unit_price.yen(), 1000);
        assert_eq!(nomination.amount.yen(), 3000);
        assert_eq!(quote.line(LineCode::Inhouse).unwrap().amount.yen(), 2000);
    }

    #[test]
    fn test_custom_tariff_and_tax() {
        let mut tariff = Tariff::standard().with_plan(PlanDefinition {
            plan: PlanId::Bar,
            set: BillingTrack {
                base_price: Money::from_yen(1001),
                base_duration_minutes: 60,
                extension_unit_minutes: 15,
                extension_price: Money::from_yen(500),
            },
            room: None,
        });
        tariff.service_tax = TaxRate::from_bps(1000);
        let engine = QuoteEngine::new(tariff).unwrap();

        let quote = engine
            .quote(&session(PlanId::Bar, 61, AddOns::default()))
            .unwrap();
        assert_eq!(quote.subtotal.yen(), 1501);
        // ¥1,501 × 10% = ¥150.1 → ¥150
        assert_eq!(quote.service_tax.yen(), 150);
        assert_eq!(quote.total.yen(), 1651);
    }

    #[test]
    fn test_overflowing_drinks_are_invalid_input() {
        let add_ons = AddOns {
            drink_total: u64::MAX,
            ..AddOns::default()
        };
        let err = QuoteEngine::standard()
            .quote(&session(PlanId::Bar, 60, add_ons))
            .unwrap_err();
        assert!(err.is_invalid_input());

        let add_ons = AddOns {
            drink_total: i64::MAX as u64,
            ..AddOns::default()
        };
        let err = QuoteEngine::standard()
            .quote(&session(PlanId::Bar, 60, add_ons))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
