// Natural-language time and date phrases for narration and display.
//
// Norwegian follows the everyday spoken clock ("fem på halv ti"); English
// uses the matching "past/to" forms.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::countdown::Remaining;
use super::error::ClockError;
use super::moment::Moment;
use super::ring::RingName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "no")]
    Norwegian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// BCP-47 tag handed to speech providers
    pub fn tag(self) -> &'static str {
        match self {
            Self::Norwegian => "nb-NO",
            Self::English => "en-US",
        }
    }

    /// Short voice code understood by espeak-style synthesizers
    pub fn voice(self) -> &'static str {
        match self {
            Self::Norwegian => "nb",
            Self::English => "en",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Norwegian => Self::English,
            Self::English => Self::Norwegian,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Norwegian => "no",
            Self::English => "en",
        })
    }
}

impl FromStr for Language {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no" | "nb" | "nb-no" | "norsk" | "norwegian" => Ok(Self::Norwegian),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            _ => Err(ClockError::UnknownLanguage(s.to_string())),
        }
    }
}

const MONTHS_NO: [&str; 12] = [
    "januar", "februar", "mars", "april", "mai", "juni", "juli", "august", "september", "oktober",
    "november", "desember",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// Index 0 and 12 are both "twelve" so 12-hour arithmetic can index directly.
const HOUR_WORDS_NO: [&str; 13] = [
    "tolv", "ett", "to", "tre", "fire", "fem", "seks", "sju", "åtte", "ni", "ti", "elleve", "tolv",
];

const HOUR_WORDS_EN: [&str; 13] = [
    "twelve", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve",
];

pub fn month_name(month: u32, lang: Language) -> &'static str {
    let idx = (month % 12) as usize;
    match lang {
        Language::Norwegian => MONTHS_NO[idx],
        Language::English => MONTHS_EN[idx],
    }
}

pub fn weekday_name(day: Weekday, lang: Language) -> &'static str {
    match (lang, day) {
        (Language::Norwegian, Weekday::Mon) => "mandag",
        (Language::Norwegian, Weekday::Tue) => "tirsdag",
        (Language::Norwegian, Weekday::Wed) => "onsdag",
        (Language::Norwegian, Weekday::Thu) => "torsdag",
        (Language::Norwegian, Weekday::Fri) => "fredag",
        (Language::Norwegian, Weekday::Sat) => "lørdag",
        (Language::Norwegian, Weekday::Sun) => "søndag",
        (Language::English, Weekday::Mon) => "Monday",
        (Language::English, Weekday::Tue) => "Tuesday",
        (Language::English, Weekday::Wed) => "Wednesday",
        (Language::English, Weekday::Thu) => "Thursday",
        (Language::English, Weekday::Fri) => "Friday",
        (Language::English, Weekday::Sat) => "Saturday",
        (Language::English, Weekday::Sun) => "Sunday",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 12-hour face position (1..=12) of a 24-hour or 12-hour value
fn twelve(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// "9:05"
pub fn digital(hour: u32, minute: u32) -> String {
    format!("{}:{:02}", hour, minute)
}

/// Short phrase used by the practice quiz, with digits for the hour:
/// "kvart over 3", "halv 4" / "quarter past 3", "half past 3".
pub fn clock_phrase(hour: u32, minute: u32, lang: Language) -> String {
    let h = twelve(hour);
    let next = twelve(h + 1);
    match lang {
        Language::Norwegian => match minute {
            0 => format!("klokka {h}"),
            15 => format!("kvart over {h}"),
            30 => format!("halv {next}"),
            45 => format!("kvart på {next}"),
            m if m < 30 => format!("{m} over {h}"),
            m => format!("{} på {next}", 60 - m),
        },
        Language::English => match minute {
            0 => format!("{h} o'clock"),
            15 => format!("quarter past {h}"),
            30 => format!("half past {h}"),
            45 => format!("quarter to {next}"),
            m if m < 30 => format!("{m} past {h}"),
            m => format!("{} to {next}", 60 - m),
        },
    }
}

/// Full spoken time with number words and part of day:
/// "fem på halv ti på formiddagen" / "twenty-five past nine in the morning".
pub fn spoken_time(hour: u32, minute: u32, lang: Language) -> String {
    let h = twelve(hour) as usize;
    let next = twelve(hour + 1) as usize;
    match lang {
        Language::Norwegian => {
            let period = if hour < 12 {
                "på formiddagen"
            } else if hour < 18 {
                "på ettermiddagen"
            } else {
                "på kvelden"
            };
            let (cur, nxt) = (HOUR_WORDS_NO[h], HOUR_WORDS_NO[next]);
            let body = match minute {
                0 => cur.to_string(),
                15 => format!("kvart over {cur}"),
                30 => format!("halv {nxt}"),
                45 => format!("kvart på {nxt}"),
                5 => format!("fem over {cur}"),
                10 => format!("ti over {cur}"),
                20 => format!("tjue over {cur}"),
                25 => format!("fem på halv {nxt}"),
                35 => format!("fem over halv {nxt}"),
                40 => format!("tjue på {nxt}"),
                50 => format!("ti på {nxt}"),
                55 => format!("fem på {nxt}"),
                m if m < 30 => format!("{m} over {cur}"),
                m => format!("{} på {nxt}", 60 - m),
            };
            format!("{body} {period}")
        }
        Language::English => {
            let period = if hour < 12 {
                "in the morning"
            } else if hour < 18 {
                "in the afternoon"
            } else {
                "in the evening"
            };
            let (cur, nxt) = (HOUR_WORDS_EN[h], HOUR_WORDS_EN[next]);
            let body = match minute {
                0 => format!("{cur} o'clock"),
                15 => format!("quarter past {cur}"),
                30 => format!("half past {cur}"),
                45 => format!("quarter to {nxt}"),
                5 => format!("five past {cur}"),
                10 => format!("ten past {cur}"),
                20 => format!("twenty past {cur}"),
                25 => format!("twenty-five past {cur}"),
                35 => format!("twenty-five to {nxt}"),
                40 => format!("twenty to {nxt}"),
                50 => format!("ten to {nxt}"),
                55 => format!("five to {nxt}"),
                1 => format!("one minute past {cur}"),
                59 => format!("one minute to {nxt}"),
                m if m < 30 => format!("{m} minutes past {cur}"),
                m => format!("{} minutes to {nxt}", 60 - m),
            };
            format!("{body} {period}")
        }
    }
}

/// "mandag 3. mars" / "Monday, March 3"
pub fn spoken_date(moment: Moment, lang: Language) -> String {
    let weekday = weekday_name(moment.weekday(), lang);
    let month = month_name(moment.month(), lang);
    match lang {
        Language::Norwegian => format!("{weekday} {}. {month}", moment.day()),
        Language::English => format!("{weekday}, {month} {}", moment.day()),
    }
}

/// "3. mars 2024" / "March 3, 2024"
pub fn formatted_date(moment: Moment, lang: Language) -> String {
    let month = month_name(moment.month(), lang);
    match lang {
        Language::Norwegian => format!("{}. {month} {}", moment.day(), moment.year()),
        Language::English => format!("{month} {}, {}", moment.day(), moment.year()),
    }
}

/// Full announcement of a Moment, as spoken by the "say" action.
pub fn time_announcement(moment: Moment, lang: Language) -> String {
    let time = spoken_time(moment.hour(), moment.minute(), lang);
    let date = spoken_date(moment, lang);
    match lang {
        Language::Norwegian => format!("Klokka er {time}. Det er {date}."),
        Language::English => format!("It is {time}, {date}."),
    }
}

fn counted(n: u32, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// Phrase for the value a single ring shows, spoken when a drag ends.
pub fn ring_phrase(moment: Moment, ring: RingName, lang: Language) -> String {
    match (ring, lang) {
        (RingName::Months, Language::Norwegian) => {
            format!("{} {}", capitalize(month_name(moment.month(), lang)), moment.year())
        }
        (RingName::Months, Language::English) => {
            format!("{} {}", month_name(moment.month(), lang), moment.year())
        }
        (RingName::Days, Language::Norwegian) => format!("den {}.", moment.day()),
        (RingName::Days, Language::English) => format!("day {}", moment.day()),
        (RingName::Hours, Language::Norwegian) => format!("klokka {}", moment.hour()),
        (RingName::Hours, Language::English) => format!("hour {}", moment.hour()),
        (RingName::Minutes, Language::Norwegian) => counted(moment.minute(), "minutt", "minutter"),
        (RingName::Minutes, Language::English) => counted(moment.minute(), "minute", "minutes"),
        (RingName::Seconds, Language::Norwegian) => counted(moment.second(), "sekund", "sekunder"),
        (RingName::Seconds, Language::English) => counted(moment.second(), "second", "seconds"),
    }
}

/// "Det er 2 timer og 5 minutter igjen" / "Lunsj er om 5 minutter"
pub fn countdown_phrase(remaining: &Remaining, event: Option<&str>, lang: Language) -> String {
    let event = event.map(str::trim).filter(|e| !e.is_empty());
    match lang {
        Language::Norwegian => {
            let mut text = match event {
                Some(name) => format!("{name} er om "),
                None => "Det er ".to_string(),
            };
            if remaining.hours > 0 {
                text.push_str(&counted(remaining.hours, "time", "timer"));
                text.push_str(" og ");
            }
            text.push_str(&counted(remaining.minutes, "minutt", "minutter"));
            if event.is_none() {
                text.push_str(" igjen");
            }
            text
        }
        Language::English => {
            let mut span = String::new();
            if remaining.hours > 0 {
                span.push_str(&counted(remaining.hours, "hour", "hours"));
                span.push_str(" and ");
            }
            span.push_str(&counted(remaining.minutes, "minute", "minutes"));
            match event {
                Some(name) => format!("{name} is in {span}"),
                None => format!("{span} left"),
            }
        }
    }
}

/// Compact duration without a leading "om"/"in": "5 min", "2 t", "1t 5m".
/// `None` when less than a minute is left.
pub fn short_duration(remaining: &Remaining, lang: Language) -> Option<String> {
    let (h, m) = (remaining.hours, remaining.minutes);
    let hour_unit = match lang {
        Language::Norwegian => "t",
        Language::English => "h",
    };
    match (h, m) {
        (0, 0) => None,
        (0, m) => Some(format!("{m} min")),
        (h, 0) => Some(format!("{h} {hour_unit}")),
        (h, m) => Some(format!("{h}{hour_unit} {m}m")),
    }
}

/// "om 1t 5m" / "in 1h 5m", or "Nå!" / "Now!"
pub fn until_label(remaining: &Remaining, lang: Language) -> String {
    match (short_duration(remaining, lang), lang) {
        (None, Language::Norwegian) => "Nå!".to_string(),
        (None, Language::English) => "Now!".to_string(),
        (Some(d), Language::Norwegian) => format!("om {d}"),
        (Some(d), Language::English) => format!("in {d}"),
    }
}

/// "Lunsj er klokka 11 og 30. Det er 2t 5m." / "Lunch is at 11:30. That is 2h 5m away."
pub fn routine_phrase(name: &str, hour: u32, minute: u32, remaining: &Remaining, lang: Language) -> String {
    match lang {
        Language::Norwegian => {
            let when = if minute > 0 {
                format!("klokka {hour} og {minute}")
            } else {
                format!("klokka {hour}")
            };
            match short_duration(remaining, lang) {
                Some(d) => format!("{name} er {when}. Det er {d}."),
                None => format!("{name} er {when}. Det er nå!"),
            }
        }
        Language::English => {
            let when = digital(hour, minute);
            match short_duration(remaining, lang) {
                Some(d) => format!("{name} is at {when}. That is {d} away."),
                None => format!("{name} is at {when}. That is now!"),
            }
        }
    }
}

/// "I dag", "I morgen (1 dag til)", "3 dager siden" / "Today", ...
pub fn day_distance_phrase(days: i64, lang: Language) -> String {
    match lang {
        Language::Norwegian => match days {
            0 => "I dag".to_string(),
            1 => "I morgen (1 dag til)".to_string(),
            -1 => "I går (1 dag siden)".to_string(),
            d if d > 0 => format!("{d} dager til"),
            d => format!("{} dager siden", d.unsigned_abs()),
        },
        Language::English => match days {
            0 => "Today".to_string(),
            1 => "Tomorrow (1 day to go)".to_string(),
            -1 => "Yesterday (1 day ago)".to_string(),
            d if d > 0 => format!("{d} days to go"),
            d => format!("{} days ago", d.unsigned_abs()),
        },
    }
}
