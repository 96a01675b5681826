// Drag gestures across rings and hands, driven through the public engine API
// the way the clock screen drives it.

use tidstreneren::engine::hands::{Hand, HandAngles, apply_hand_angle};
use tidstreneren::engine::ring::{
    DragSession, RingName, angle_for_value, apply_ring_value, read_ring, step_ring,
};

use crate::common::assertions::assert_moment;
use crate::common::helpers::moment;

/// Angle at the centre of month `value`
fn month_angle(value: u32) -> f64 {
    angle_for_value(value, 12)
}

#[test]
fn test_month_gesture_across_new_year_and_back() {
    let start = moment(2023, 10, 15, 12, 0, 0);
    let mut session = DragSession::begin(RingName::Months, start);

    // November -> December -> January: one year forward
    let m = session.drag_to(start, month_angle(11));
    assert_moment(m, (2023, 11, 15, 12, 0, 0));
    let m = session.drag_to(m, month_angle(0));
    assert_moment(m, (2024, 0, 15, 12, 0, 0));
    let m = session.drag_to(m, month_angle(1));
    assert_moment(m, (2024, 1, 15, 12, 0, 0));

    // And back across the boundary again
    let m = session.drag_to(m, month_angle(0));
    let m = session.drag_to(m, month_angle(11));
    assert_moment(m, (2023, 11, 15, 12, 0, 0));
}

#[test]
fn test_small_backwards_drag_stays_in_year() {
    let start = moment(2024, 4, 10, 8, 0, 0);
    let mut session = DragSession::begin(RingName::Months, start);
    let m = session.drag_to(start, month_angle(3));
    assert_moment(m, (2024, 3, 10, 8, 0, 0));
}

#[test]
fn test_new_gesture_forgets_previous_month() {
    let start = moment(2024, 11, 1, 0, 0, 0);
    let mut first = DragSession::begin(RingName::Months, start);
    let m = first.drag_to(start, month_angle(10));

    // A fresh gesture starting in November must not see December as "last"
    let mut second = DragSession::begin(RingName::Months, m);
    assert_eq!(second.last_value(), 10);
    let m = second.drag_to(m, month_angle(9));
    assert_moment(m, (2024, 9, 1, 0, 0, 0));
}

#[test]
fn test_day_drag_on_short_month_cascades() {
    // Leap February: 29 segments; dragging to the last one lands on the 29th
    let feb = moment(2024, 1, 10, 6, 30, 0);
    let mut session = DragSession::begin(RingName::Days, feb);
    let m = session.drag_to(feb, 359.9);
    assert_moment(m, (2024, 1, 29, 6, 30, 0));

    // Setting a day ring value past the end cascades into March
    let m = apply_ring_value(feb, RingName::Days, 30);
    assert_moment(m, (2024, 2, 2, 6, 30, 0));
}

#[test]
fn test_ring_value_round_trip_for_every_ring() {
    let m = moment(2025, 6, 31, 23, 59, 58);
    for ring in RingName::ALL {
        let reading = read_ring(m, ring);
        assert!(reading.value < reading.count, "{ring}");
        assert_eq!(apply_ring_value(m, ring, reading.value as i64), m, "{ring}");
    }
}

#[test]
fn test_steppers_cascade_like_drags() {
    let m = moment(2024, 11, 31, 23, 59, 59);
    assert_moment(step_ring(m, RingName::Seconds, 1), (2025, 0, 1, 0, 0, 0));
    assert_moment(step_ring(m, RingName::Hours, -24), (2024, 11, 30, 23, 59, 59));
    assert_moment(step_ring(m, RingName::Months, 2), (2025, 2, 3, 23, 59, 59));
}

#[test]
fn test_hand_drag_keeps_afternoon() {
    let m = moment(2024, 3, 1, 15, 20, 0);
    let m = apply_hand_angle(m, Hand::Hour, 300.0);
    assert_moment(m, (2024, 3, 1, 22, 20, 0));
    let m = apply_hand_angle(m, Hand::Minute, 90.0);
    assert_moment(m, (2024, 3, 1, 22, 15, 0));

    let angles = HandAngles::of(m);
    assert_eq!(angles.minute, 90.0);
    assert_eq!(angles.hour, 10.0 * 30.0 + 15.0 * 0.5);
}
