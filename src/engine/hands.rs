// Analog clock hands

use serde::Serialize;
use std::str::FromStr;

use super::error::ClockError;
use super::moment::{Moment, TimeUnit};
use super::ring::value_for_angle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl FromStr for Hand {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            _ => Err(ClockError::UnknownHand(s.to_string())),
        }
    }
}

/// Hand angles in degrees, clockwise from 12 o'clock, on a 12-hour face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        let (m, s) = (minute as f64, second as f64);
        Self {
            hour: ((hour % 12) as f64 + m / 60.0) * 30.0,
            minute: (m + s / 60.0) * 6.0,
            second: s * 6.0,
        }
    }

    pub fn of(moment: Moment) -> Self {
        Self::new(moment.hour(), moment.minute(), moment.second())
    }

    pub fn get(&self, hand: Hand) -> f64 {
        match hand {
            Hand::Hour => self.hour,
            Hand::Minute => self.minute,
            Hand::Second => self.second,
        }
    }
}

/// Tip of a hand of `length` at `angle`, in y-up coordinates centred on
/// the dial.
pub fn hand_tip(angle: f64, length: f64) -> (f64, f64) {
    let radians = angle.to_radians();
    (length * radians.sin(), length * radians.cos())
}

/// Set the time from a dragged hand. The hour hand keeps AM/PM of the
/// current hour; minute and second hands map the full circle onto 0..60.
pub fn apply_hand_angle(moment: Moment, hand: Hand, angle: f64) -> Moment {
    match hand {
        Hand::Hour => {
            let position = value_for_angle(angle, 12) as i64;
            let pm = moment.hour() >= 12;
            moment.with(TimeUnit::Hour, if pm { position + 12 } else { position })
        }
        Hand::Minute => moment.with(TimeUnit::Minute, value_for_angle(angle, 60) as i64),
        Hand::Second => moment.with(TimeUnit::Second, value_for_angle(angle, 60) as i64),
    }
}
