#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tidstreneren::config::Config;
use tidstreneren::engine::moment::Moment;

/// A Moment from a 0-based month, panicking on impossible dates.
pub fn moment(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Moment {
    Moment::new(year, month, day, hour, minute, second)
        .unwrap_or_else(|| panic!("invalid test moment {year}-{month}-{day}"))
}

/// Wall-clock instant on a fixed test day (1-based month like chrono)
pub fn wall(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .expect("valid test date-time")
}

/// Default config with speech switched off so tests never spawn a synthesizer.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.speech.enabled = false;
    config
}
