// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::countdown::TimeOfDay;
use crate::engine::narration::Language;
use crate::engine::ring::RingName;
use crate::engine::speech::{ProviderChain, Speaker};

const APP_DIR: &str = "tidstreneren";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub startup: StartupConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub countdown: CountdownConfig,

    #[serde(default)]
    pub important_dates: Vec<ImportantDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Whether the clock ticks when the TUI launches
    #[serde(default = "default_true")]
    pub running: bool,

    /// Narration language: "no" or "en"
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Only show the rings selected in `units`
    #[serde(default)]
    pub simplified_mode: bool,

    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default = "default_true")]
    pub show_seconds_hand: bool,
}

/// Rings shown in simplified mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(default = "default_true")]
    pub months: bool,
    #[serde(default = "default_true")]
    pub days: bool,
    #[serde(default = "default_true")]
    pub hours: bool,
    #[serde(default = "default_true")]
    pub minutes: bool,
    #[serde(default = "default_true")]
    pub seconds: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Speaking rate, 1.0 is the synthesizer's normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// How long a provider gets to fail before it counts as speaking
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Command templates tried in order.
    /// Supports: {text}, {lang}, {voice}, {rate}, {wpm}
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_countdown_hour")]
    pub hour: u32,

    #[serde(default)]
    pub minute: u32,

    /// Optional name spoken with the countdown ("until lunch")
    #[serde(default)]
    pub event_name: Option<String>,
}

/// A yearly date highlighted in the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantDate {
    pub label: String,
    /// 1-12
    pub month: u32,
    pub day: u32,
}

fn default_true() -> bool {
    true
}

fn default_rate() -> f32 {
    0.85
}

fn default_timeout_ms() -> u64 {
    400
}

fn default_countdown_hour() -> u32 {
    12
}

fn default_providers() -> Vec<String> {
    vec![
        "espeak-ng -v {voice} -s {wpm} {text}".to_string(),
        "spd-say -w -l {voice} {text}".to_string(),
        "say {text}".to_string(),
    ]
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            running: true,
            language: Language::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            simplified_mode: false,
            units: UnitsConfig::default(),
            show_seconds_hand: true,
        }
    }
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            months: true,
            days: true,
            hours: true,
            minutes: true,
            seconds: true,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: default_rate(),
            timeout_ms: default_timeout_ms(),
            providers: default_providers(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            hour: default_countdown_hour(),
            minute: 0,
            event_name: None,
        }
    }
}

impl UnitsConfig {
    pub fn is_shown(&self, ring: RingName) -> bool {
        match ring {
            RingName::Months => self.months,
            RingName::Days => self.days,
            RingName::Hours => self.hours,
            RingName::Minutes => self.minutes,
            RingName::Seconds => self.seconds,
        }
    }

    pub fn toggle(&mut self, ring: RingName) {
        let flag = match ring {
            RingName::Months => &mut self.months,
            RingName::Days => &mut self.days,
            RingName::Hours => &mut self.hours,
            RingName::Minutes => &mut self.minutes,
            RingName::Seconds => &mut self.seconds,
        };
        *flag = !*flag;
    }
}

impl DisplayConfig {
    /// Rings to draw, innermost first
    pub fn visible_rings(&self) -> Vec<RingName> {
        RingName::ALL
            .into_iter()
            .filter(|r| !self.simplified_mode || self.units.is_shown(*r))
            .collect()
    }
}

impl SpeechConfig {
    pub fn provider_chain(&self) -> ProviderChain {
        ProviderChain::from_templates(
            &self.providers,
            self.rate,
            Duration::from_millis(self.timeout_ms),
        )
    }

    pub fn build_speaker(&self) -> Speaker {
        Speaker::new(self.provider_chain())
    }
}

impl CountdownConfig {
    /// Out-of-range values fall back to noon
    pub fn target(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour, self.minute).unwrap_or(TimeOfDay {
            hour: default_countdown_hour(),
            minute: 0,
        })
    }
}

impl ImportantDate {
    /// Whether this date falls on the given 0-based month and day
    pub fn matches(&self, month0: u32, day: u32) -> bool {
        self.month == month0 + 1 && self.day == day
    }
}

impl Config {
    /// Directory holding config.toml and routines.json
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join(APP_DIR)
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join(APP_DIR)
        };
        Ok(config_dir)
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn routines_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("routines.json"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();

            // Don't fail if the directory isn't writable
            if let Err(e) = config.save() {
                tracing::warn!("Could not create default config file: {e:#}");
                eprintln!("Warning: Could not create default config file: {}", e);
                eprintln!(
                    "Using built-in defaults. Run 'tidstreneren init-config' to create a config file."
                );
            }

            Ok(config)
        }
    }

    /// Config for an interactive session, with the path edits are saved to.
    ///
    /// The path is `None` when an existing file could not be read or parsed,
    /// so a broken hand-edited config is never replaced by the defaults.
    pub fn load_session() -> (Self, Option<PathBuf>) {
        match Self::load() {
            Ok(config) => (config, Self::config_path().ok()),
            Err(e) => (Self::unsaved_defaults(&e), None),
        }
    }

    /// Same as `load_session` for an explicit path. A missing file is fine:
    /// it is written on the first save.
    pub fn load_session_from(path: &Path) -> (Self, Option<PathBuf>) {
        if !path.exists() {
            return (Self::default(), Some(path.to_path_buf()));
        }
        match Self::load_from(path) {
            Ok(config) => (config, Some(path.to_path_buf())),
            Err(e) => (Self::unsaved_defaults(&e), None),
        }
    }

    fn unsaved_defaults(error: &anyhow::Error) -> Self {
        tracing::warn!("{error:#}; using defaults, settings changes will not be saved");
        eprintln!("Warning: {error:#}");
        eprintln!("Using built-in defaults. Settings changes will not be saved until the file is fixed.");
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Create a default config file if it doesn't exist
    pub fn ensure_default() -> Result<()> {
        if !Self::exists() {
            Config::default().save()?;
        }
        Ok(())
    }

    /// Important dates on the given 0-based month and day
    pub fn important_on(&self, month0: u32, day: u32) -> Vec<&ImportantDate> {
        self.important_dates
            .iter()
            .filter(|d| d.matches(month0, day))
            .collect()
    }
}
