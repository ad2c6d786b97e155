//! # Plan Tariff
//!
//! Static pricing configuration: one [`PlanDefinition`] per plan, the flat
//! surcharge prices, and the service tax rate.
//!
//! ## Tariff Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Tariff                                     │
//! │                                                                         │
//! │  plans: [PlanDefinition]                                               │
//! │  ├── BAR      set: ¥3,000 / 90m,  +¥1,000 per 30m                      │
//! │  ├── COUNTER  set: ¥8,000 / 60m,  +¥1,000 per 10m                      │
//! │  ├── VIP_A    set: ¥12,000 / 120m, +¥10,000 per 30m                    │
//! │  │            room: ¥10,000 / 120m, +¥10,000 per 60m                   │
//! │  └── VIP_B    set: ¥15,000 / 120m, +¥12,000 per 30m                    │
//! │               room: ¥12,000 / 120m, +¥12,000 per 60m                   │
//! │                                                                         │
//! │  surcharges: nomination ¥1,000 · in-house ¥1,000                       │
//! │              house fee ¥2,000 · single charge ¥2,000                   │
//! │                                                                         │
//! │  service_tax: 20%                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A tariff is a plain value. The engine owns one; replacing it means building
//! a new engine, never editing entries in place.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::money::Money;
use crate::types::{PlanId, TaxRate};
use crate::STANDARD_SERVICE_TAX_BPS;

// =============================================================================
// Billing Track
// =============================================================================

/// One independently timed billing schedule.
///
/// The base price covers `base_duration_minutes` inclusive. Every started
/// block of `extension_unit_minutes` beyond that costs `extension_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingTrack {
    pub base_price: Money,
    pub base_duration_minutes: i64,
    pub extension_unit_minutes: i64,
    pub extension_price: Money,
}

impl BillingTrack {
    /// Number of extension blocks owed after `elapsed_minutes`.
    ///
    /// Integer ceiling division of the overage; zero overage is always zero
    /// blocks.
    ///
    /// ## Example
    /// ```rust
    /// use venue_core::money::Money;
    /// use venue_core::plan::BillingTrack;
    ///
    /// let track = BillingTrack {
    ///     base_price: Money::from_yen(3000),
    ///     base_duration_minutes: 90,
    ///     extension_unit_minutes: 30,
    ///     extension_price: Money::from_yen(1000),
    /// };
    /// assert_eq!(track.extension_blocks(90), 0);
    /// assert_eq!(track.extension_blocks(91), 1);
    /// assert_eq!(track.extension_blocks(120), 1);
    /// assert_eq!(track.extension_blocks(121), 2);
    /// ```
    pub fn extension_blocks(&self, elapsed_minutes: i64) -> i64 {
        let overage = elapsed_minutes.saturating_sub(self.base_duration_minutes).max(0);
        if overage == 0 || self.extension_unit_minutes <= 0 {
            return 0;
        }
        // (overage + unit - 1) / unit without the intermediate overflow
        overage / self.extension_unit_minutes
            + i64::from(overage % self.extension_unit_minutes != 0)
    }

    /// Checks the track's invariants.
    fn validate(&self, plan: PlanId, label: &str) -> QuoteResult<()> {
        if self.extension_unit_minutes <= 0 {
            return Err(QuoteError::plan_config(
                plan,
                format!(
                    "{} extension unit must be positive, got {} minutes",
                    label, self.extension_unit_minutes
                ),
            ));
        }
        if self.base_duration_minutes < 0 {
            return Err(QuoteError::plan_config(
                plan,
                format!("{} base duration must not be negative", label),
            ));
        }
        if self.base_price.is_negative() {
            return Err(QuoteError::plan_config(
                plan,
                format!("{} base price must not be negative", label),
            ));
        }
        if self.extension_price.is_negative() {
            return Err(QuoteError::plan_config(
                plan,
                format!("{} extension price must not be negative", label),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Plan Definition
// =============================================================================

/// Pricing of one plan: the always-on set track and an optional room track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDefinition {
    pub plan: PlanId,
    pub set: BillingTrack,
    /// Present only for plans that offer a private room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<BillingTrack>,
}

impl PlanDefinition {
    /// Returns true if the plan can bill a private room.
    pub fn supports_room(&self) -> bool {
        self.room.is_some()
    }

    /// Checks both tracks.
    pub fn validate(&self) -> QuoteResult<()> {
        self.set.validate(self.plan, "set")?;
        if let Some(room) = &self.room {
            room.validate(self.plan, "room")?;
        }
        Ok(())
    }
}

// =============================================================================
// Surcharges
// =============================================================================

/// Plan-independent add-on prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surcharges {
    /// Price per nomination.
    pub nomination_unit_price: Money,
    /// Price per in-house nomination.
    pub inhouse_unit_price: Money,
    /// Flat house fee.
    pub house_fee: Money,
    /// Flat single-guest charge.
    pub single_charge: Money,
}

impl Default for Surcharges {
    fn default() -> Self {
        Surcharges {
            nomination_unit_price: Money::from_yen(1000),
            inhouse_unit_price: Money::from_yen(1000),
            house_fee: Money::from_yen(2000),
            single_charge: Money::from_yen(2000),
        }
    }
}

impl Surcharges {
    fn validate(&self) -> QuoteResult<()> {
        let prices = [
            ("nomination_unit_price", self.nomination_unit_price),
            ("inhouse_unit_price", self.inhouse_unit_price),
            ("house_fee", self.house_fee),
            ("single_charge", self.single_charge),
        ];
        for (name, price) in prices {
            if price.is_negative() {
                return Err(QuoteError::InvalidTariff(format!(
                    "{} must not be negative, got {}",
                    name, price
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tariff
// =============================================================================

/// The complete, immutable pricing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    /// Omitted in a file, the house plans apply.
    #[serde(default = "standard_plans")]
    pub plans: Vec<PlanDefinition>,
    #[serde(default)]
    pub surcharges: Surcharges,
    #[serde(default = "standard_service_tax")]
    pub service_tax: TaxRate,
}

fn standard_service_tax() -> TaxRate {
    TaxRate::from_bps(STANDARD_SERVICE_TAX_BPS)
}

fn standard_plans() -> Vec<PlanDefinition> {
    Tariff::standard().plans
}

impl Default for Tariff {
    fn default() -> Self {
        Tariff::standard()
    }
}

impl Tariff {
    /// The house tariff.
    pub fn standard() -> Self {
        Tariff {
            plans: vec![
                PlanDefinition {
                    plan: PlanId::Bar,
                    set: track(3000, 90, 30, 1000),
                    room: None,
                },
                PlanDefinition {
                    plan: PlanId::Counter,
                    set: track(8000, 60, 10, 1000),
                    room: None,
                },
                PlanDefinition {
                    plan: PlanId::VipA,
                    set: track(12000, 120, 30, 10000),
                    room: Some(track(10000, 120, 60, 10000)),
                },
                PlanDefinition {
                    plan: PlanId::VipB,
                    set: track(15000, 120, 30, 12000),
                    room: Some(track(12000, 120, 60, 12000)),
                },
            ],
            surcharges: Surcharges::default(),
            service_tax: standard_service_tax(),
        }
    }

    /// Looks up a plan's definition.
    pub fn plan(&self, plan: PlanId) -> Option<&PlanDefinition> {
        self.plans.iter().find(|p| p.plan == plan)
    }

    /// Looks up a plan's definition, treating absence as a configuration bug.
    pub fn require_plan(&self, plan: PlanId) -> QuoteResult<&PlanDefinition> {
        self.plan(plan).ok_or(QuoteError::MissingPlan(plan))
    }

    /// Replaces (or inserts) a plan definition, builder style.
    pub fn with_plan(mut self, definition: PlanDefinition) -> Self {
        self.plans.retain(|p| p.plan != definition.plan);
        self.plans.push(definition);
        self
    }

    /// Validates every entry.
    ///
    /// ## Rules
    /// - Each plan appears at most once
    /// - Every track has a positive extension unit and non-negative prices
    /// - Surcharges are non-negative
    /// - Service tax is at most 100%
    pub fn validate(&self) -> QuoteResult<()> {
        for (i, definition) in self.plans.iter().enumerate() {
            if self.plans[..i].iter().any(|p| p.plan == definition.plan) {
                return Err(QuoteError::plan_config(
                    definition.plan,
                    "plan is defined more than once",
                ));
            }
            definition.validate()?;
        }

        self.surcharges.validate()?;

        if self.service_tax.bps() > 10000 {
            return Err(QuoteError::InvalidTariff(format!(
                "service tax must be at most 100%, got {}",
                self.service_tax
            )));
        }

        Ok(())
    }

    /// Validates and additionally requires an entry for every plan.
    pub fn validate_complete(&self) -> QuoteResult<()> {
        self.validate()?;
        for plan in PlanId::ALL {
            self.require_plan(plan)?;
        }
        Ok(())
    }
}

const fn track(base: i64, base_minutes: i64, unit_minutes: i64, extension: i64) -> BillingTrack {
    BillingTrack {
        base_price: Money::from_yen(base),
        base_duration_minutes: base_minutes,
        extension_unit_minutes: unit_minutes,
        extension_price: Money::from_yen(extension),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
