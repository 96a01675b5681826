// Moment: the civil date-time the clock rings are derived from

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ClockError;

const SECONDS_PER_DAY: i64 = 86_400;

// Well inside chrono's representable range, so month/year carries never
// have to fail.
const MIN_YEAR: i64 = -200_000;
const MAX_YEAR: i64 = 200_000;

/// The calendar fields a Moment can be edited through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// An absolute point in local civil time with whole-second precision.
///
/// Months are exposed 0-based (January = 0) and days 1-based, which is the
/// convention every ring computation works in. A Moment is never mutated;
/// each edit returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moment(NaiveDateTime);

impl Moment {
    /// Current wall-clock time, truncated to the second
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Strict constructor: `None` if any field is out of range.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(date.and_time(time)))
    }

    /// Build a Moment from possibly out-of-range fields, cascading overflow
    /// and underflow into the next larger field (seconds into minutes, ...,
    /// months into years, then days across month boundaries).
    ///
    /// The month is resolved before the day is applied, so `(2023, 1, 31)`
    /// is February 31st, i.e. March 3rd.
    pub fn normalized(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        let secs = hour
            .saturating_mul(3600)
            .saturating_add(minute.saturating_mul(60))
            .saturating_add(second);
        let carry_days = secs.div_euclid(SECONDS_PER_DAY);
        let secs_of_day = secs.rem_euclid(SECONDS_PER_DAY) as u32;

        let months = year.saturating_mul(12).saturating_add(month);
        let y = months.div_euclid(12).clamp(MIN_YEAR, MAX_YEAR) as i32;
        let m = months.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(if y < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });
        let offset = day.saturating_sub(1).saturating_add(carry_days);
        let date = TimeDelta::try_days(offset)
            .and_then(|delta| first.checked_add_signed(delta))
            .unwrap_or(if offset < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            });
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs_of_day, 0).unwrap_or(NaiveTime::MIN);

        Self(date.and_time(time))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month of year, 0-based
    pub fn month(self) -> u32 {
        self.0.month0()
    }

    /// Day of month, 1-based
    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn second(self) -> u32 {
        self.0.second()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    pub fn naive(self) -> NaiveDateTime {
        self.0
    }

    /// Raw value of one field (month 0-based)
    pub fn get(self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Year => self.year() as i64,
            TimeUnit::Month => self.month() as i64,
            TimeUnit::Day => self.day() as i64,
            TimeUnit::Hour => self.hour() as i64,
            TimeUnit::Minute => self.minute() as i64,
            TimeUnit::Second => self.second() as i64,
        }
    }

    /// Replace one field, keeping the others, and normalize.
    pub fn with(self, unit: TimeUnit, value: i64) -> Self {
        let mut fields = [
            self.year() as i64,
            self.month() as i64,
            self.day() as i64,
            self.hour() as i64,
            self.minute() as i64,
            self.second() as i64,
        ];
        let idx = match unit {
            TimeUnit::Year => 0,
            TimeUnit::Month => 1,
            TimeUnit::Day => 2,
            TimeUnit::Hour => 3,
            TimeUnit::Minute => 4,
            TimeUnit::Second => 5,
        };
        fields[idx] = value;
        let [y, mo, d, h, mi, s] = fields;
        Self::normalized(y, mo, d, h, mi, s)
    }

    /// Stepper edit: move one field by `delta` units with calendar carry
    pub fn adjust(self, unit: TimeUnit, delta: i64) -> Self {
        self.with(unit, self.get(unit).saturating_add(delta))
    }

    pub fn add_seconds(self, seconds: i64) -> Self {
        self.adjust(TimeUnit::Second, seconds)
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_naive(dt)
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for Moment {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for fmt in [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(Self::from_naive(dt));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|d| Self(d.and_time(NaiveTime::MIN)))
            .map_err(|_| ClockError::InvalidMoment(s.to_string()))
    }
}
