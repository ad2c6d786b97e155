//! Observed checkout scenarios priced against the house tariff.

use chrono::{DateTime, Duration, TimeZone, Utc};
use venue_core::{AddOns, LineCode, PlanId, Quote, QuoteEngine, SessionInput};

fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 20, 0, 0).unwrap()
}

fn quote(plan: PlanId, minutes: i64, add_ons: AddOns) -> Quote {
    QuoteEngine::standard()
        .quote(&SessionInput {
            plan,
            start_at: opened_at(),
            end_at: opened_at() + Duration::minutes(minutes),
            add_ons,
        })
        .expect("session should price")
}

fn codes(quote: &Quote) -> Vec<LineCode> {
    quote.lines.iter().map(|l| l.code).collect()
}

#[test]
fn bar_exactly_at_allotment_has_no_extension() {
    let q = quote(PlanId::Bar, 90, AddOns::default());

    assert_eq!(codes(&q), [LineCode::Base]);
    assert_eq!(q.subtotal.yen(), 3000);
    assert_eq!(q.service_tax.yen(), 600);
    assert_eq!(q.total.yen(), 3600);
    assert!(!q.has_extension());
}

#[test]
fn bar_five_minutes_over_bills_one_block() {
    let q = quote(PlanId::Bar, 95, AddOns::default());

    assert_eq!(codes(&q), [LineCode::Base, LineCode::ExtSet]);
    let ext = q.line(LineCode::ExtSet).unwrap();
    assert_eq!(ext.quantity, 1);
    assert_eq!(ext.amount.yen(), 1000);
    assert_eq!(q.subtotal.yen(), 4000);
    assert_eq!(q.service_tax.yen(), 800);
    assert_eq!(q.total.yen(), 4800);
}

#[test]
fn counter_seventy_five_minutes_bills_two_blocks() {
    let q = quote(PlanId::Counter, 75, AddOns::default());

    let ext = q.line(LineCode::ExtSet).unwrap();
    assert_eq!(ext.quantity, 2);
    assert_eq!(ext.amount.yen(), 2000);
    assert_eq!(q.subtotal.yen(), 10000);
    assert_eq!(q.total.yen(), 12000);
}

#[test]
fn vip_a_with_room_runs_both_timers() {
    let add_ons = AddOns {
        use_room: true,
        ..AddOns::default()
    };
    let q = quote(PlanId::VipA, 140, add_ons);

    assert_eq!(
        codes(&q),
        [
            LineCode::Base,
            LineCode::ExtSet,
            LineCode::RoomBase,
            LineCode::ExtRoom
        ]
    );
    assert_eq!(q.line(LineCode::Base).unwrap().amount.yen(), 12000);
    assert_eq!(q.line(LineCode::RoomBase).unwrap().amount.yen(), 10000);
    assert_eq!(q.line(LineCode::ExtSet).unwrap().amount.yen(), 10000);
    assert_eq!(q.line(LineCode::ExtRoom).unwrap().amount.yen(), 10000);
    assert_eq!(q.subtotal.yen(), 42000);
    assert_eq!(q.service_tax.yen(), 8400);
    assert_eq!(q.total.yen(), 50400);
}

#[test]
fn bar_with_every_add_on() {
    let add_ons = AddOns {
        use_room: false,
        nomination_count: 1,
        inhouse_count: 2,
        apply_house_fee: true,
        apply_single_charge: true,
        drink_total: 3000,
    };
    let q = quote(PlanId::Bar, 90, add_ons);

    assert_eq!(
        codes(&q),
        [
            LineCode::Base,
            LineCode::Nomination,
            LineCode::Inhouse,
            LineCode::HouseFee,
            LineCode::SingleCharge,
            LineCode::Drink
        ]
    );
    let amounts: Vec<i64> = q.lines.iter().map(|l| l.amount.yen()).collect();
    assert_eq!(amounts, [3000, 1000, 2000, 2000, 2000, 3000]);
    assert_eq!(q.subtotal.yen(), 13000);
    assert_eq!(q.service_tax.yen(), 2600);
    assert_eq!(q.total.yen(), 15600);
}

#[test]
fn vip_a_without_room_ignores_room_track() {
    let q = quote(PlanId::VipA, 140, AddOns::default());

    assert!(!q.has_line(LineCode::RoomBase));
    assert!(!q.has_line(LineCode::ExtRoom));
    assert_eq!(q.subtotal.yen(), 22000);
}

#[test]
fn quote_serializes_for_the_checkout_ui() {
    let q = quote(PlanId::Bar, 95, AddOns::default());
    let json = serde_json::to_value(&q).unwrap();

    assert_eq!(json["plan"], "BAR");
    assert_eq!(json["elapsedMinutes"], 95);
    assert_eq!(json["lines"][1]["code"], "EXT_SET");
    assert_eq!(json["lines"][1]["amount"], 1000);
    assert_eq!(json["serviceTax"], 800);
    assert_eq!(json["total"], 4800);
}

#[test]
fn session_input_parses_from_json() {
    let raw = r#"{
        "plan": "VIP_A",
        "startAt": "2026-04-01T20:00:00Z",
        "endAt": "2026-04-01T22:20:00Z",
        "addOns": { "useRoom": true }
    }"#;
    let input: SessionInput = serde_json::from_str(raw).unwrap();
    let q = QuoteEngine::standard().quote(&input).unwrap();
    assert_eq!(q.total.yen(), 50400);

    let unknown_plan = raw.replace("VIP_A", "VIP_Z");
    assert!(serde_json::from_str::<SessionInput>(&unknown_plan).is_err());
}
