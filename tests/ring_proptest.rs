//! Property-based tests for the calendar and ring arithmetic
//!
//! Generates arbitrary years, Moments and angles and checks the invariants
//! the dial relies on.

use proptest::prelude::*;
use tidstreneren::engine::calendar::{days_in_month, is_leap_year};
use tidstreneren::engine::hands::HandAngles;
use tidstreneren::engine::moment::Moment;
use tidstreneren::engine::ring::{
    DragSession, RingName, angle_for_value, apply_ring_value, read_ring, value_for_angle,
};

fn any_moment() -> impl Strategy<Value = Moment> {
    (1600i32..2400, 0u32..12, 1u32..=31, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            // Clamp the day so every generated Moment is a real date
            let d = d.min(days_in_month(y, mo));
            Moment::new(y, mo, d, h, mi, s).expect("clamped date is valid")
        },
    )
}

fn any_ring() -> impl Strategy<Value = RingName> {
    prop::sample::select(RingName::ALL.to_vec())
}

proptest! {
    #[test]
    fn leap_year_follows_gregorian_rule(year in -10_000i32..10_000) {
        let expected = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        prop_assert_eq!(is_leap_year(year), expected);
    }

    #[test]
    fn february_has_29_days_only_in_leap_years(year in -10_000i32..10_000) {
        let expected = if is_leap_year(year) { 29 } else { 28 };
        prop_assert_eq!(days_in_month(year, 1), expected);
    }

    #[test]
    fn ring_values_stay_in_range(m in any_moment(), ring in any_ring()) {
        let reading = read_ring(m, ring);
        prop_assert!(reading.value < reading.count);
    }

    #[test]
    fn reapplying_a_ring_value_is_identity(m in any_moment(), ring in any_ring()) {
        let reading = read_ring(m, ring);
        prop_assert_eq!(apply_ring_value(m, ring, reading.value as i64), m);
    }

    #[test]
    fn segment_boundaries_map_to_their_value(count in 1u32..=60, k in 0u32..60) {
        prop_assume!(k < count);
        let angle = 360.0 * k as f64 / count as f64;
        prop_assert_eq!(value_for_angle(angle, count), k);
        prop_assert_eq!(value_for_angle(angle_for_value(k, count), count), k);
    }

    #[test]
    fn any_angle_maps_into_the_ring(angle in -1e6f64..1e6, count in 1u32..=60) {
        prop_assert!(value_for_angle(angle, count) < count);
    }

    #[test]
    fn drag_only_changes_the_dragged_ring(
        m in any_moment(),
        angle in 0.0f64..360.0,
        ring in prop::sample::select(vec![RingName::Hours, RingName::Minutes, RingName::Seconds]),
    ) {
        let mut session = DragSession::begin(ring, m);
        let dragged = session.drag_to(m, angle);
        prop_assert_eq!(dragged.date(), m.date());
        for other in [RingName::Hours, RingName::Minutes, RingName::Seconds] {
            if other != ring {
                prop_assert_eq!(read_ring(dragged, other), read_ring(m, other));
            }
        }
        prop_assert_eq!(read_ring(dragged, ring).value, session.last_value());
    }

    #[test]
    fn hand_angles_stay_on_the_face(h in 0u32..24, mi in 0u32..60, s in 0u32..60) {
        let angles = HandAngles::new(h, mi, s);
        for angle in [angles.hour, angles.minute, angles.second] {
            prop_assert!((0.0..360.0).contains(&angle));
        }
    }
}

#[test]
fn test_angle_just_under_full_turn_is_last_segment() {
    for count in [12, 24, 28, 29, 30, 31, 60] {
        assert_eq!(value_for_angle(359.999, count), count - 1);
        assert_eq!(value_for_angle(0.0, count), 0);
        assert_eq!(value_for_angle(360.0, count), 0);
    }
}

#[test]
fn test_three_oclock_angles() {
    let angles = HandAngles::new(3, 0, 0);
    assert_eq!((angles.hour, angles.minute, angles.second), (90.0, 0.0, 0.0));
}
