// Countdown to a time of day

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ClockError;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// An hour:minute target, today or (once passed) tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Minutes since midnight
    pub fn minutes(self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Step by whole minutes, wrapping around midnight.
    pub fn step_minutes(self, delta: i32) -> Self {
        let total = (self.minutes() as i64 + delta as i64).rem_euclid(24 * 60) as u32;
        Self {
            hour: total / 60,
            minute: total % 60,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClockError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.trim().parse::<u32>().map_err(|_| invalid())?;
        let minute = m.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

/// Time left until a countdown target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub total_ms: i64,
}

impl Remaining {
    pub fn from_millis(total_ms: i64) -> Self {
        let ms = total_ms.max(0);
        Self {
            hours: (ms / MS_PER_HOUR) as u32,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
            total_ms,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

/// How close a countdown is to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Relaxed,
    Near,
    Soon,
    Imminent,
}

impl Urgency {
    pub fn of(remaining: &Remaining) -> Self {
        match remaining.total_minutes() {
            0..=5 => Self::Imminent,
            6..=15 => Self::Soon,
            16..=30 => Self::Near,
            _ => Self::Relaxed,
        }
    }
}

/// Time from `now` until the next occurrence of `target`. A target equal to
/// `now` counts as passed and rolls to tomorrow.
pub fn time_until(target: TimeOfDay, now: NaiveDateTime) -> Remaining {
    let time = NaiveTime::from_hms_opt(target.hour, target.minute, 0).unwrap_or(NaiveTime::MIN);
    let mut at = now.date().and_time(time);
    if at <= now {
        at = at.checked_add_signed(TimeDelta::days(1)).unwrap_or(at);
    }
    Remaining::from_millis((at - now).num_milliseconds())
}
