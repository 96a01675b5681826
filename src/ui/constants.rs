// Dial colors and sizes - single source of truth for the clock screens

use crate::engine::ring::{RING_BASE_RADIUS, RING_SPACING, RingName};
use ratatui::style::Color;

/// Ring colors, matching the legend
pub const MONTHS_COLOR: Color = Color::Rgb(211, 84, 0);
pub const DAYS_COLOR: Color = Color::Rgb(39, 174, 96);
pub const HOURS_COLOR: Color = Color::Rgb(41, 128, 185);
pub const MINUTES_COLOR: Color = Color::Rgb(142, 68, 173);
pub const SECONDS_COLOR: Color = Color::Rgb(231, 76, 60);
pub const YEAR_COLOR: Color = Color::Rgb(44, 62, 80);
pub const LEAP_DAY_COLOR: Color = Color::Rgb(155, 89, 182);
pub const EMPTY_SEGMENT_COLOR: Color = Color::DarkGray;

/// Ring band thickness inward from its radius, in dial units
pub const RING_THICKNESS: f64 = 20.0;

/// Empty space around the outermost ring
pub const DIAL_MARGIN: f64 = 30.0;

/// Analog face radius and hand lengths, in face units
pub const FACE_RADIUS: f64 = 100.0;
pub const HOUR_HAND_LENGTH: f64 = 50.0;
pub const MINUTE_HAND_LENGTH: f64 = 75.0;
pub const SECOND_HAND_LENGTH: f64 = 85.0;

/// A hand is grabbed when the pointer is within this many degrees of it
pub const HAND_GRAB_DEGREES: f64 = 20.0;

/// Render tick (~30 FPS) and clock tick
pub const RENDER_TICK_MS: u64 = 33;
pub const CLOCK_TICK_MS: u64 = 1000;

pub fn ring_color(ring: RingName) -> Color {
    match ring {
        RingName::Months => MONTHS_COLOR,
        RingName::Days => DAYS_COLOR,
        RingName::Hours => HOURS_COLOR,
        RingName::Minutes => MINUTES_COLOR,
        RingName::Seconds => SECONDS_COLOR,
    }
}

/// Outer radius of a dial showing `ring_count` rings
pub fn dial_radius(ring_count: usize) -> f64 {
    let outermost = RING_BASE_RADIUS + ring_count.saturating_sub(1) as f64 * RING_SPACING;
    outermost + DIAL_MARGIN
}
