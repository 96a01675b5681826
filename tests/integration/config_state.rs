// Config file round-trips and the UI state built from a config.

use tempfile::TempDir;
use tidstreneren::config::{Config, ImportantDate};
use tidstreneren::engine::narration::Language;
use tidstreneren::engine::ring::RingName;
use tidstreneren::ui::state::{AppState, Screen};

use crate::common::helpers::{moment, quiet_config};

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.startup.language = Language::English;
    config.display.simplified_mode = true;
    config.display.units.seconds = false;
    config.countdown.hour = 7;
    config.countdown.minute = 45;
    config.countdown.event_name = Some("Skolebuss".to_string());
    config.important_dates.push(ImportantDate {
        label: "Bursdag".to_string(),
        month: 3,
        day: 14,
    });
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.startup.language, Language::English);
    assert!(loaded.display.simplified_mode);
    assert_eq!(
        loaded.display.visible_rings(),
        vec![RingName::Months, RingName::Days, RingName::Hours, RingName::Minutes]
    );
    assert_eq!(loaded.countdown.target().to_string(), "07:45");
    assert_eq!(loaded.countdown.event_name.as_deref(), Some("Skolebuss"));
    // March 14 with a 0-based month
    assert_eq!(loaded.important_on(2, 14).len(), 1);
    assert!(loaded.important_on(3, 14).is_empty());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[speech]\nenabled = false\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.speech.enabled);
    assert_eq!(config.speech.timeout_ms, 400);
    assert!(config.startup.running);
    assert!(config.display.show_seconds_hand);
    assert_eq!(config.countdown.target().to_string(), "12:00");
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display\nsimplified_mode = yes").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_malformed_config_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let broken = "[speech]\nproviders = [\"espeak-ng -v {voice}\"\n\n[[important_dates]]\nlabel = \"Mormor\"";
    std::fs::write(&path, broken).unwrap();

    let (config, save_path) = Config::load_session_from(&path);
    assert_eq!(config, Config::default());
    assert!(save_path.is_none());

    let mut state = AppState::new(moment(2024, 5, 15, 13, 0, 0), false, Language::English, config);
    state.config_path = save_path;
    state.config.startup.language = Language::Norwegian;
    state.persist_config();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_session_config_saves_to_its_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    // Missing file: defaults, written on the first save
    let (config, save_path) = Config::load_session_from(&path);
    assert_eq!(save_path.as_deref(), Some(path.as_path()));

    let mut state = AppState::new(moment(2024, 5, 15, 13, 0, 0), false, Language::English, config);
    state.config_path = save_path;
    state.config.display.simplified_mode = true;
    state.persist_config();

    let (reloaded, again) = Config::load_session_from(&path);
    assert!(reloaded.display.simplified_mode);
    assert_eq!(again.as_deref(), Some(path.as_path()));
}

#[test]
fn test_app_state_from_config() {
    let mut config = quiet_config();
    config.countdown.hour = 14;
    config.countdown.event_name = Some("Svømming".to_string());
    config.display.simplified_mode = true;
    config.display.units.months = false;

    let start = moment(2024, 5, 15, 13, 0, 0);
    let state = AppState::new(start, true, Language::Norwegian, config);

    assert_eq!(state.current_screen, Screen::Clock);
    assert!(state.speaker.is_none());
    assert!(state.config_path.is_none());
    assert_eq!(state.clock.moment, start);
    assert!(state.clock.running);
    assert_eq!(state.countdown.target.to_string(), "14:00");
    assert_eq!(state.countdown.event(), Some("Svømming"));
    assert!(!state.visible_rings().contains(&RingName::Months));
    assert_eq!((state.calendar.year, state.calendar.month), (2024, 5));
}

#[test]
fn test_clock_ticks_only_while_running() {
    let start = moment(2024, 1, 28, 23, 59, 59);
    let mut state = AppState::new(start, true, Language::English, quiet_config());
    state.on_clock_tick();
    assert_eq!(state.clock.moment, moment(2024, 1, 29, 0, 0, 0));

    state.clock.toggle_running();
    state.on_clock_tick();
    assert_eq!(state.clock.moment, moment(2024, 1, 29, 0, 0, 0));
}
