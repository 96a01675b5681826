// Daily routines: a small list of named times of day

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::countdown::{Remaining, TimeOfDay, time_until};
use super::error::ClockError;

/// Routines starting within this many minutes count as upcoming
pub const UPCOMING_WINDOW_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub hours: u32,
    pub minutes: u32,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "⭐".to_string()
}

impl Routine {
    pub fn new(name: impl Into<String>, hours: u32, minutes: u32, icon: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            hours,
            minutes,
            icon: icon.into(),
        }
    }

    pub fn time(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.hours,
            minute: self.minutes,
        }
    }

    /// Minutes since midnight
    pub fn start_minute(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    pub fn time_until(&self, now: NaiveDateTime) -> Remaining {
        time_until(self.time(), now)
    }
}

pub fn default_routines() -> Vec<Routine> {
    [
        ("Våkne", 7, 0, "☀️"),
        ("Frokost", 7, 30, "🍳"),
        ("Skole begynner", 8, 30, "🏫"),
        ("Friminutt", 10, 0, "⚽"),
        ("Lunsj", 11, 30, "🥪"),
        ("Skole slutt", 14, 0, "🎒"),
        ("Middag", 17, 0, "🍽️"),
        ("Leggetid", 20, 30, "🌙"),
    ]
    .into_iter()
    .map(|(name, h, m, icon)| Routine::new(name, h, m, icon))
    .collect()
}

/// Fields that can be changed on an existing routine
#[derive(Debug, Clone, Default)]
pub struct RoutineUpdate {
    pub name: Option<String>,
    pub time: Option<TimeOfDay>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineBook {
    pub routines: Vec<Routine>,
}

impl Default for RoutineBook {
    fn default() -> Self {
        Self {
            routines: default_routines(),
        }
    }
}

impl RoutineBook {
    pub fn new(routines: Vec<Routine>) -> Self {
        Self { routines }
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    pub fn add(&mut self, name: &str, time: TimeOfDay, icon: Option<&str>) -> Result<Uuid, ClockError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClockError::EmptyRoutineName);
        }
        let routine = Routine::new(
            name,
            time.hour,
            time.minute,
            icon.map(str::to_string).unwrap_or_else(default_icon),
        );
        let id = routine.id;
        self.routines.push(routine);
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Routine, ClockError> {
        let idx = self
            .routines
            .iter()
            .position(|r| r.id == id)
            .ok_or(ClockError::RoutineNotFound(id))?;
        Ok(self.routines.remove(idx))
    }

    pub fn update(&mut self, id: Uuid, update: RoutineUpdate) -> Result<(), ClockError> {
        let routine = self
            .routines
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ClockError::RoutineNotFound(id))?;

        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ClockError::EmptyRoutineName);
            }
            routine.name = name.to_string();
        }
        if let Some(time) = update.time {
            routine.hours = time.hour;
            routine.minutes = time.minute;
        }
        if let Some(icon) = update.icon {
            routine.icon = icon;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.routines = default_routines();
    }

    /// Routines in order of start time
    pub fn sorted(&self) -> Vec<&Routine> {
        let mut sorted: Vec<&Routine> = self.routines.iter().collect();
        sorted.sort_by_key(|r| r.start_minute());
        sorted
    }

    /// The routine whose slot (from its start until the next routine
    /// starts) contains `now`. The last routine of the day runs until the
    /// first one tomorrow.
    pub fn current(&self, now: NaiveDateTime) -> Option<&Routine> {
        let sorted = self.sorted();
        let now_minute = now.hour() * 60 + now.minute();

        sorted.iter().enumerate().find_map(|(idx, routine)| {
            let start = routine.start_minute();
            let end = match sorted.get(idx + 1) {
                Some(next) => next.start_minute(),
                None => sorted[0].start_minute() + MINUTES_PER_DAY,
            };
            (now_minute >= start && now_minute < end).then_some(*routine)
        })
        // Before the first routine of the day we are still in yesterday's
        // last slot.
        .or_else(|| sorted.last().copied().filter(|_| now_minute < sorted[0].start_minute()))
    }

    /// Routines starting later today within the upcoming window
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&Routine> {
        let now_minute = now.hour() * 60 + now.minute();
        self.sorted()
            .into_iter()
            .filter(|r| {
                let start = r.start_minute();
                start > now_minute && start - now_minute <= UPCOMING_WINDOW_MINUTES
            })
            .collect()
    }

    /// Load from a JSON file, falling back to the defaults when it does not
    /// exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(path)
            .with_context(|| format!("Failed to open routines file: {}", path.display()))?;
        let routines: Vec<Routine> = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse routines file: {}", path.display()))?;
        if let Some(bad) = routines
            .iter()
            .find(|r| TimeOfDay::new(r.hours, r.minutes).is_none())
        {
            let time = format!("{:02}:{:02}", bad.hours, bad.minutes);
            return Err(ClockError::InvalidTime(time)).with_context(|| {
                format!("Routine '{}' in {}", bad.name, path.display())
            });
        }
        Ok(Self { routines })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create routines directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(&self.routines).context("Failed to serialize routines")?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create routines file: {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write routines file: {}", path.display()))?;
        Ok(())
    }
}
