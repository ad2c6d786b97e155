//! # Domain Types
//!
//! Core domain types used throughout the venue back office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  SessionInput   │   │     Quote       │   │ PaymentRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  plan           │   │  lines          │   │  visit_id       │       │
//! │  │  start_at       │──►│  subtotal       │──►│  method         │       │
//! │  │  end_at         │   │  service_tax    │   │  amount         │       │
//! │  │  add_ons        │   │  total          │   │  change_amount  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    PlanId       │   │   LineCode      │   │     Visit       │       │
//! │  │  BAR  COUNTER   │   │  BASE  EXT_SET  │   │  (stored by     │       │
//! │  │  VIP_A  VIP_B   │   │  ROOM_BASE ...  │   │   collaborator) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything on the left of the arrow is caller input, everything on the
//! right is derived. Nothing here has identity except visits and payments,
//! which belong to the storage collaborators.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (the venue service tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage (20 → 2000 bps).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Plan Identifier
// =============================================================================

/// The closed set of seating plans.
///
/// Unknown identifiers are rejected at the edge (parsing or deserialization),
/// never coerced to a default plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanId {
    /// Bar seating.
    Bar,
    /// Counter seating.
    Counter,
    /// VIP course A (supports a private room).
    VipA,
    /// VIP course B (supports a private room).
    VipB,
}

impl PlanId {
    /// Every plan, in canonical order.
    pub const ALL: [PlanId; 4] = [PlanId::Bar, PlanId::Counter, PlanId::VipA, PlanId::VipB];

    /// Stable wire identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlanId::Bar => "BAR",
            PlanId::Counter => "COUNTER",
            PlanId::VipA => "VIP_A",
            PlanId::VipB => "VIP_B",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = ValidationError;

    /// Parses a plan identifier. Case and `-`/`_` are normalized, anything
    /// else unknown is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        PlanId::ALL
            .into_iter()
            .find(|plan| plan.as_str() == normalized)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "plan".to_string(),
                allowed: PlanId::ALL.iter().map(|p| p.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Add-ons
// =============================================================================

/// Optional per-session charges.
///
/// Every field has an explicit default, so an empty JSON object `{}` is a
/// session with no add-ons at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOns {
    /// Bill the private room track as well.
    pub use_room: bool,
    /// Number of nominations (staff selections).
    pub nomination_count: u32,
    /// Number of in-house nominations.
    pub inhouse_count: u32,
    /// Apply the flat house fee.
    pub apply_house_fee: bool,
    /// Apply the flat single-guest charge.
    pub apply_single_charge: bool,
    /// Drinks ordered during the session, passed through at face value.
    pub drink_total: u64,
}

// =============================================================================
// Session Input
// =============================================================================

/// Everything the engine needs to price one seating session.
///
/// `end_at` is always supplied by the caller, even for "now": the engine
/// never reads the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub plan: PlanId,
    #[ts(as = "String")]
    pub start_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub add_ons: AddOns,
}

// =============================================================================
// Line Items
// =============================================================================

/// Stable identifier of a quote line.
///
/// Declaration order is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCode {
    Base,
    ExtSet,
    RoomBase,
    ExtRoom,
    Nomination,
    Inhouse,
    HouseFee,
    SingleCharge,
    Drink,
}

impl LineCode {
    /// Stable wire identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineCode::Base => "BASE",
            LineCode::ExtSet => "EXT_SET",
            LineCode::RoomBase => "ROOM_BASE",
            LineCode::ExtRoom => "EXT_ROOM",
            LineCode::Nomination => "NOMINATION",
            LineCode::Inhouse => "INHOUSE",
            LineCode::HouseFee => "HOUSE_FEE",
            LineCode::SingleCharge => "SINGLE_CHARGE",
            LineCode::Drink => "DRINK",
        }
    }

    /// True for time-based extension lines.
    pub const fn is_extension(&self) -> bool {
        matches!(self, LineCode::ExtSet | LineCode::ExtRoom)
    }

    /// True for lines produced by the room track.
    pub const fn is_room(&self) -> bool {
        matches!(self, LineCode::RoomBase | LineCode::ExtRoom)
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributing charge on a quote.
///
/// `amount == unit_price × quantity` for every line. Extension lines carry
/// the block count as quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub code: LineCode,
    pub unit_price: Money,
    pub quantity: i64,
    pub amount: Money,
}

// =============================================================================
// Quote
// =============================================================================

/// The priced breakdown of a session.
///
/// Produced fresh by every call to the engine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Plan the session was priced under.
    pub plan: PlanId,
    /// Whole minutes between start and end (fractions truncated).
    pub elapsed_minutes: i64,
    /// Line items in canonical order.
    pub lines: Vec<LineItem>,
    /// Sum of all line amounts.
    pub subtotal: Money,
    /// Service tax on the whole subtotal.
    pub service_tax: Money,
    /// `subtotal + service_tax`.
    pub total: Money,
}

impl Quote {
    /// Returns the first line with the given code.
    pub fn line(&self, code: LineCode) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.code == code)
    }

    /// Returns true if any line carries the given code.
    pub fn has_line(&self, code: LineCode) -> bool {
        self.line(code).is_some()
    }

    /// Returns true if any extension line was billed.
    pub fn has_extension(&self) -> bool {
        self.lines.iter().any(|l| l.code.is_extension())
    }

    /// Sum of the line amounts, recomputed.
    pub fn lines_total(&self) -> Money {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

// =============================================================================
// Visit (collaborator record)
// =============================================================================

/// Settlement state of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// Guests are seated (or checked out but not yet paid).
    #[default]
    Open,
    /// A payment has been recorded.
    Settled,
}

/// A seating visit as supplied by the visit store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub plan: PlanId,
    #[ts(as = "String")]
    pub start_at: DateTime<Utc>,
    /// Set when staff check the party out; `None` while still seated.
    #[ts(as = "Option<String>")]
    pub check_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub add_ons: AddOns,
    #[serde(default)]
    pub status: VisitStatus,
}

impl Visit {
    /// Builds the engine input for this visit.
    ///
    /// The recorded check-out time wins; `as_of` is used only while the party
    /// is still seated.
    pub fn session_input(&self, as_of: DateTime<Utc>) -> SessionInput {
        SessionInput {
            plan: self.plan,
            start_at: self.start_at,
            end_at: self.check_out_at.unwrap_or(as_of),
            add_ons: self.add_ons,
        }
    }

    /// Returns true once a payment has been recorded.
    pub fn is_settled(&self) -> bool {
        self.status == VisitStatus::Settled
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the guest paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    ExternalCard,
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "external_card" | "credit" | "debit" => Ok(PaymentMethod::ExternalCard),
            _ => Err(ValidationError::NotAllowed {
                field: "method".to_string(),
                allowed: vec!["cash".to_string(), "card".to_string()],
            }),
        }
    }
}

/// A confirmed payment for a visit, written once staff accept the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub visit_id: String,
    pub method: PaymentMethod,
    /// Amount charged (the quote total).
    pub amount: Money,
    /// For cash: what the guest handed over.
    pub cash_received: Option<Money>,
    /// For cash: change returned to the guest.
    pub change_amount: Option<Money>,
    pub notes: Option<String>,
    /// The quote this payment settled, frozen at confirmation time.
    pub quote: Quote,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert_eq!(TaxRate::from_percent(20), rate);
        assert_eq!(rate.to_string(), "20.00%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn test_plan_id_parsing() {
        assert_eq!("BAR".parse::<PlanId>().unwrap(), PlanId::Bar);
        assert_eq!("counter".parse::<PlanId>().unwrap(), PlanId::Counter);
        assert_eq!("vip-a".parse::<PlanId>().unwrap(), PlanId::VipA);
        assert_eq!("VIP_B".parse::<PlanId>().unwrap(), PlanId::VipB);

        let err = "VIP_C".parse::<PlanId>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert!("".parse::<PlanId>().is_err());
    }

    #[test]
    fn test_plan_id_serde_rejects_unknown() {
        assert_eq!(serde_json::to_string(&PlanId::VipA).unwrap(), "\"VIP_A\"");
        assert!(serde_json::from_str::<PlanId>("\"VIP_A\"").is_ok());
        assert!(serde_json::from_str::<PlanId>("\"PLATINUM\"").is_err());
    }

    #[test]
    fn test_add_ons_defaults() {
        let add_ons: AddOns = serde_json::from_str("{}").unwrap();
        assert_eq!(add_ons, AddOns::default());
        assert!(!add_ons.use_room);
        assert_eq!(add_ons.nomination_count, 0);
        assert_eq!(add_ons.drink_total, 0);

        let add_ons: AddOns =
            serde_json::from_str(r#"{"useRoom":true,"drinkTotal":3000}"#).unwrap();
        assert!(add_ons.use_room);
        assert_eq!(add_ons.drink_total, 3000);
        assert!(!add_ons.apply_house_fee);
    }

    #[test]
    fn test_line_code_wire_names() {
        assert_eq!(serde_json::to_string(&LineCode::ExtSet).unwrap(), "\"EXT_SET\"");
        assert_eq!(serde_json::to_string(&LineCode::RoomBase).unwrap(), "\"ROOM_BASE\"");
        assert_eq!(
            serde_json::to_string(&LineCode::SingleCharge).unwrap(),
            "\"SINGLE_CHARGE\""
        );
        assert!(LineCode::ExtRoom.is_extension());
        assert!(LineCode::ExtRoom.is_room());
        assert!(!LineCode::Base.is_extension());
    }

    #[test]
    fn test_visit_session_input_prefers_check_out() {
        let start = Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap();
        let mut visit = Visit {
            id: "v-1".to_string(),
            plan: PlanId::Bar,
            start_at: start,
            check_out_at: None,
            add_ons: AddOns::default(),
            status: VisitStatus::Open,
        };

        let now = start + Duration::minutes(45);
        assert_eq!(visit.session_input(now).end_at, now);

        let checked_out = start + Duration::minutes(30);
        visit.check_out_at = Some(checked_out);
        assert_eq!(visit.session_input(now).end_at, checked_out);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Card".parse::<PaymentMethod>().unwrap(), PaymentMethod::ExternalCard);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
