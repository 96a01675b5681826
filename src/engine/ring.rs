// Time rings: deriving ring positions from a Moment and turning pointer
// angles back into Moments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calendar::days_in_month;
use super::error::ClockError;
use super::moment::{Moment, TimeUnit};

/// Display radius of the innermost ring, in dial units
pub const RING_BASE_RADIUS: f64 = 80.0;

/// Radial distance between neighbouring rings, in dial units
pub const RING_SPACING: f64 = 60.0;

/// A month drag that was last at or above this month...
const ROLLOVER_LATE_MONTH: u32 = 10;
/// ...and lands at or below this one (or the reverse) crossed New Year.
const ROLLOVER_EARLY_MONTH: u32 = 2;

// Absorbs float error when an angle sits exactly on a segment boundary.
const SEGMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingName {
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl RingName {
    /// Innermost first
    pub const ALL: [RingName; 5] = [
        RingName::Months,
        RingName::Days,
        RingName::Hours,
        RingName::Minutes,
        RingName::Seconds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    pub fn unit(self) -> TimeUnit {
        match self {
            Self::Months => TimeUnit::Month,
            Self::Days => TimeUnit::Day,
            Self::Hours => TimeUnit::Hour,
            Self::Minutes => TimeUnit::Minute,
            Self::Seconds => TimeUnit::Second,
        }
    }
}

impl fmt::Display for RingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RingName {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "months" | "month" => Ok(Self::Months),
            "days" | "day" => Ok(Self::Days),
            "hours" | "hour" => Ok(Self::Hours),
            "minutes" | "minute" => Ok(Self::Minutes),
            "seconds" | "second" => Ok(Self::Seconds),
            _ => Err(ClockError::UnknownRing(s.to_string())),
        }
    }
}

/// Position of one ring: `value` is 0-based and always `< count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RingReading {
    pub value: u32,
    pub count: u32,
}

/// A ring as laid out on the dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingSpec {
    pub name: RingName,
    pub count: u32,
    pub value: u32,
    pub radius: f64,
}

/// Derive the position of `ring` from a Moment.
pub fn read_ring(moment: Moment, ring: RingName) -> RingReading {
    match ring {
        RingName::Months => RingReading {
            value: moment.month(),
            count: 12,
        },
        RingName::Days => RingReading {
            value: moment.day() - 1,
            count: days_in_month(moment.year(), moment.month()),
        },
        RingName::Hours => RingReading {
            value: moment.hour(),
            count: 24,
        },
        RingName::Minutes => RingReading {
            value: moment.minute(),
            count: 60,
        },
        RingName::Seconds => RingReading {
            value: moment.second(),
            count: 60,
        },
    }
}

/// Lay out the given rings from the centre outwards.
pub fn ring_layout(moment: Moment, rings: &[RingName]) -> Vec<RingSpec> {
    rings
        .iter()
        .enumerate()
        .map(|(index, &name)| {
            let reading = read_ring(moment, name);
            RingSpec {
                name,
                count: reading.count,
                value: reading.value,
                radius: RING_BASE_RADIUS + index as f64 * RING_SPACING,
            }
        })
        .collect()
}

/// Pick the ring whose radius is closest to `distance`, if the pointer is
/// within half a ring spacing of it.
pub fn ring_at(layout: &[RingSpec], distance: f64) -> Option<RingName> {
    layout
        .iter()
        .map(|spec| (spec.name, (spec.radius - distance).abs()))
        .filter(|(_, gap)| *gap <= RING_SPACING / 2.0)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

/// Clockwise angle from 12 o'clock, in degrees within `[0, 360)`, of a
/// pointer offset from the dial centre. Screen coordinates: `dy` grows
/// downwards.
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    normalize_angle(dx.atan2(-dy).to_degrees())
}

pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Discrete ring value under `angle` for a ring with `count` segments.
pub fn value_for_angle(angle: f64, count: u32) -> u32 {
    if count == 0 || !angle.is_finite() {
        return 0;
    }
    let angle = normalize_angle(angle);
    let segment = (angle * count as f64 / 360.0 + SEGMENT_EPSILON).floor();
    (segment as u32).min(count - 1)
}

/// Centre angle of the segment holding `value`; used to place markers.
pub fn angle_for_value(value: u32, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (value as f64 + 0.5) * 360.0 / count as f64
}

/// Set one ring to a 0-based `value`, keeping every other field and
/// cascading out-of-range values into larger fields.
pub fn apply_ring_value(moment: Moment, ring: RingName, value: i64) -> Moment {
    match ring {
        RingName::Days => moment.with(TimeUnit::Day, value.saturating_add(1)),
        other => moment.with(other.unit(), value),
    }
}

/// Move a ring by `delta` steps (the +/- buttons).
pub fn step_ring(moment: Moment, ring: RingName, delta: i64) -> Moment {
    moment.adjust(ring.unit(), delta)
}

/// State for one pointer-down to pointer-up gesture on a ring.
///
/// Only the months ring uses the remembered value: dragging across the
/// December/January boundary moves the year. The thresholds are a
/// heuristic for continuous dragging; a fast sweep from, say, September
/// to March is read as a backwards drag within the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    ring: RingName,
    last_value: u32,
}

impl DragSession {
    pub fn begin(ring: RingName, moment: Moment) -> Self {
        Self {
            ring,
            last_value: read_ring(moment, ring).value,
        }
    }

    pub fn ring(&self) -> RingName {
        self.ring
    }

    pub fn last_value(&self) -> u32 {
        self.last_value
    }

    /// Apply a pointer at `angle` degrees to `moment`.
    pub fn drag_to(&mut self, moment: Moment, angle: f64) -> Moment {
        let count = read_ring(moment, self.ring).count;
        let value = value_for_angle(angle, count);

        let moment = if self.ring == RingName::Months {
            let prev = self.last_value;
            if prev >= ROLLOVER_LATE_MONTH && value <= ROLLOVER_EARLY_MONTH {
                tracing::debug!(from = prev, to = value, "month drag crossed into next year");
                moment.adjust(TimeUnit::Year, 1)
            } else if prev <= ROLLOVER_EARLY_MONTH && value >= ROLLOVER_LATE_MONTH {
                tracing::debug!(from = prev, to = value, "month drag crossed into previous year");
                moment.adjust(TimeUnit::Year, -1)
            } else {
                moment
            }
        } else {
            moment
        };

        self.last_value = value;
        apply_ring_value(moment, self.ring, value as i64)
    }
}
