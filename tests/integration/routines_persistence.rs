// Routine book edits saved to and loaded from JSON on disk.

use tempfile::TempDir;
use tidstreneren::engine::countdown::TimeOfDay;
use tidstreneren::engine::error::ClockError;
use tidstreneren::engine::routine::{RoutineBook, RoutineUpdate};
use tidstreneren::ui::state::RoutinesState;

use crate::common::helpers::wall;

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let book = RoutineBook::load_or_default(&dir.path().join("routines.json")).unwrap();
    assert_eq!(book, RoutineBook::default());
    assert_eq!(book.routines.len(), 8);
}

#[test]
fn test_edits_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("routines.json");

    let mut book = RoutineBook::default();
    let piano = book
        .add("Piano", TimeOfDay::new(16, 15).unwrap(), Some("🎹"))
        .unwrap();
    let first = book.sorted()[0].id;
    book.remove(first).unwrap();
    book.update(
        piano,
        RoutineUpdate {
            name: Some("Pianotime".to_string()),
            ..RoutineUpdate::default()
        },
    )
    .unwrap();
    book.save(&path).unwrap();

    let loaded = RoutineBook::load_or_default(&path).unwrap();
    assert_eq!(loaded, book);
    let piano = loaded.routines.iter().find(|r| r.id == piano).unwrap();
    assert_eq!(piano.name, "Pianotime");
    assert_eq!(piano.icon, "🎹");
    assert_eq!(piano.time().to_string(), "16:15");
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routines.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = RoutineBook::load_or_default(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse routines file"));
}

#[test]
fn test_corrupt_file_survives_edits_in_the_ui() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routines.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut routines = RoutinesState::load(path.clone());
    assert!(routines.path.is_none());
    let names: Vec<&str> = routines.book.sorted().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"Våkne"));
    assert_eq!(names.len(), 8);

    routines
        .book
        .add("Svømming", TimeOfDay::new(17, 0).unwrap(), None)
        .unwrap();
    routines.save();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_valid_file_keeps_its_save_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routines.json");
    RoutineBook::default().save(&path).unwrap();

    let mut routines = RoutinesState::load(path.clone());
    assert_eq!(routines.path.as_deref(), Some(path.as_path()));
    routines.book.reset();
    routines
        .book
        .add("Svømming", TimeOfDay::new(17, 0).unwrap(), None)
        .unwrap();
    routines.save();
    let loaded = RoutineBook::load_or_default(&path).unwrap();
    assert!(loaded.routines.iter().any(|r| r.name == "Svømming"));
}

#[test]
fn test_out_of_range_time_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routines.json");
    std::fs::write(
        &path,
        r#"[{"id":"6f1c2b9e-3d4a-4c5b-8e7f-0a1b2c3d4e5f","name":"Natt","hours":25,"minutes":0}]"#,
    )
    .unwrap();
    let err = RoutineBook::load_or_default(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ClockError>(),
        Some(&ClockError::InvalidTime("25:00".to_string()))
    );
    assert!(format!("{err:#}").contains("Routine 'Natt'"));

    std::fs::write(
        &path,
        r#"[{"id":"6f1c2b9e-3d4a-4c5b-8e7f-0a1b2c3d4e5f","name":"Tur","hours":18,"minutes":60}]"#,
    )
    .unwrap();
    assert!(RoutineBook::load_or_default(&path).is_err());
}

#[test]
fn test_missing_icon_gets_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routines.json");
    std::fs::write(
        &path,
        r#"[{"id":"6f1c2b9e-3d4a-4c5b-8e7f-0a1b2c3d4e5f","name":"Tur","hours":18,"minutes":0}]"#,
    )
    .unwrap();
    let book = RoutineBook::load_or_default(&path).unwrap();
    assert_eq!(book.routines[0].icon, "⭐");
}

#[test]
fn test_current_and_upcoming_from_loaded_book() {
    let book = RoutineBook::default();

    // 11:10: school break is running, lunch at 11:30 is coming up
    let now = wall(2024, 9, 2, 11, 10, 0);
    assert_eq!(book.current(now).map(|r| r.name.as_str()), Some("Friminutt"));
    let upcoming: Vec<_> = book.upcoming(now).iter().map(|r| r.name.clone()).collect();
    assert_eq!(upcoming, vec!["Lunsj".to_string()]);

    // Before waking up we are still in last night's bedtime slot
    let early = wall(2024, 9, 2, 5, 0, 0);
    assert_eq!(book.current(early).map(|r| r.name.as_str()), Some("Leggetid"));
}
