//! Property-based tests for coworking-core.
//!
//! These tests verify pricing and overlap invariants hold for arbitrary
//! inputs using proptest.
//!
//! Run with: cargo test -p coworking-core --test `property_tests`

use chrono::{NaiveDate, NaiveTime};
use coworking_core::{
    overlaps, pricing, MemberId, Reservation, ReservationId, Room, RoomId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_discount() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2)))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1u32..4u32).prop_map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
}

/// A start/end pair on a quarter-hour grid with start < end.
fn arb_slot() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (0u32..80u32, 1u32..16u32).prop_map(|(start, len)| {
        let minutes = |q: u32| NaiveTime::from_hms_opt(q * 15 / 60, q * 15 % 60, 0).unwrap();
        (minutes(start), minutes(start + len))
    })
}

fn arb_reservation() -> impl Strategy<Value = Reservation> {
    (1u32..4u32, arb_date(), arb_slot(), arb_discount()).prop_map(
        |(room, date, (start, end), discount)| {
            let mut r = Reservation::new(
                ReservationId(1),
                MemberId(1),
                RoomId(room),
                date,
                start,
                end,
            );
            r.discount_pct = discount;
            r
        },
    )
}

fn room(price: Decimal) -> Room {
    Room::new(
        RoomId(1),
        "Sala Norte",
        price,
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
    )
}

// ============================================================================
// Overlap properties
// ============================================================================

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(a in arb_reservation(), b in arb_reservation()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn prop_touching_slots_never_overlap(a in arb_reservation(), len in 1u32..8u32) {
        let mut b = a.clone();
        b.start_time = a.end_time;
        b.end_time = a.end_time + chrono::Duration::minutes(i64::from(len) * 15);
        prop_assume!(b.end_time > b.start_time);
        prop_assert!(!overlaps(&a, &b));
        prop_assert!(!overlaps(&b, &a));
    }

    #[test]
    fn prop_overlap_requires_same_room_and_day(a in arb_reservation(), b in arb_reservation()) {
        if overlaps(&a, &b) {
            prop_assert_eq!(a.room_id, b.room_id);
            prop_assert_eq!(a.date, b.date);
        }
    }
}

// ============================================================================
// Pricing properties
// ============================================================================

proptest! {
    #[test]
    fn prop_cost_plus_discount_is_base(price in arb_price(), r in arb_reservation()) {
        let room = room(price);
        let base = pricing::base_price(&room, &r).unwrap();
        let discount = pricing::discount_amount(&room, &r).unwrap();
        let cost = pricing::cost(&room, &r).unwrap();
        prop_assert_eq!(cost + discount, base);
    }

    #[test]
    fn prop_cost_without_discount_is_price_times_hours(price in arb_price(), mut r in arb_reservation()) {
        r.discount_pct = None;
        let room = room(price);
        let expected = price * Decimal::from(r.duration_seconds()) / Decimal::from(3600);
        prop_assert_eq!(pricing::cost(&room, &r).unwrap(), expected);
    }

    #[test]
    fn prop_whole_cent_prices_in_thirds_of_an_hour_stay_exact(
        cents in 0i64..100_000i64,
        thirds in 1i64..30i64,
    ) {
        // 20 minutes per third
        let price = Decimal::new(cents * 3, 2);
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(thirds * 20);
        let r = Reservation::new(ReservationId(1), MemberId(1), RoomId(1), day, start, end);
        prop_assert_eq!(
            pricing::cost(&room(price), &r).unwrap(),
            Decimal::new(cents * thirds, 2)
        );
    }

    #[test]
    fn prop_cost_is_bounded_by_base(price in arb_price(), r in arb_reservation()) {
        let room = room(price);
        let cost = pricing::cost(&room, &r).unwrap();
        prop_assert!(cost >= Decimal::ZERO);
        prop_assert!(cost <= pricing::base_price(&room, &r).unwrap());
    }
}
