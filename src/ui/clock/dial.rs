// Mapping between terminal cells and dial coordinates

use crate::engine::hands::{Hand, HandAngles};
use crate::engine::ring::{RingName, RingSpec, pointer_angle, ring_at};
use crate::ui::constants::{
    HAND_GRAB_DEGREES, HOUR_HAND_LENGTH, MINUTE_HAND_LENGTH, SECOND_HAND_LENGTH,
};
use ratatui::layout::Rect;

// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Where a circular canvas was last drawn and which dial units it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub area: Rect,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// A pointer position relative to the dial centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialPoint {
    /// Degrees clockwise from 12 o'clock
    pub angle: f64,
    pub distance: f64,
}

impl DialGeometry {
    /// Bounds that keep a circle of `radius` round inside `area`.
    pub fn fit(area: Rect, radius: f64) -> Self {
        let width = area.width.max(1) as f64;
        let height = area.height.max(1) as f64 * CELL_ASPECT;
        let (half_x, half_y) = if width >= height {
            (radius * width / height, radius)
        } else {
            (radius, radius * height / width)
        };
        Self {
            area,
            x_bounds: [-half_x, half_x],
            y_bounds: [-half_y, half_y],
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Dial coordinates (y up) of the centre of a terminal cell
    pub fn to_dial(&self, column: u16, row: u16) -> (f64, f64) {
        let fx = (column.saturating_sub(self.area.x) as f64 + 0.5) / self.area.width.max(1) as f64;
        let fy = (row.saturating_sub(self.area.y) as f64 + 0.5) / self.area.height.max(1) as f64;
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        (x0 + fx * (x1 - x0), y1 - fy * (y1 - y0))
    }

    pub fn point(&self, column: u16, row: u16) -> DialPoint {
        let (x, y) = self.to_dial(column, row);
        DialPoint {
            // pointer_angle works in screen coordinates
            angle: pointer_angle(x, -y),
            distance: x.hypot(y),
        }
    }
}

/// Ring under a pointer, if any
pub fn ring_under(layout: &[RingSpec], point: DialPoint) -> Option<RingName> {
    ring_at(layout, point.distance)
}

pub fn hand_length(hand: Hand) -> f64 {
    match hand {
        Hand::Hour => HOUR_HAND_LENGTH,
        Hand::Minute => MINUTE_HAND_LENGTH,
        Hand::Second => SECOND_HAND_LENGTH,
    }
}

fn angular_gap(a: f64, b: f64) -> f64 {
    let gap = (a - b).rem_euclid(360.0);
    gap.min(360.0 - gap)
}

/// The hand closest to the pointer's angle, among hands long enough to
/// reach it.
pub fn hand_under(angles: &HandAngles, hands: &[Hand], point: DialPoint) -> Option<Hand> {
    hands
        .iter()
        .copied()
        .filter(|h| point.distance <= hand_length(*h) + 10.0)
        .map(|h| (h, angular_gap(angles.get(h), point.angle)))
        .filter(|(_, gap)| *gap <= HAND_GRAB_DEGREES)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}
