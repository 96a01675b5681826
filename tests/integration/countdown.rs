// Countdown remainders, urgency and how they are narrated.

use tidstreneren::engine::countdown::{TimeOfDay, Urgency, time_until};
use tidstreneren::engine::narration::{Language, countdown_phrase, until_label};

use crate::common::helpers::wall;

fn target(text: &str) -> TimeOfDay {
    text.parse().expect("valid HH:MM")
}

#[test]
fn test_half_hour_before_nine() {
    let r = time_until(target("09:00"), wall(2024, 5, 10, 8, 30, 0));
    assert_eq!((r.hours, r.minutes, r.seconds), (0, 30, 0));
    assert_eq!(Urgency::of(&r), Urgency::Near);
    assert_eq!(until_label(&r, Language::English), "in 30 min");
}

#[test]
fn test_one_second_late_rolls_to_tomorrow() {
    let r = time_until(target("09:00"), wall(2024, 5, 10, 9, 0, 1));
    assert_eq!((r.hours, r.minutes, r.seconds), (23, 59, 59));
    assert_eq!(Urgency::of(&r), Urgency::Relaxed);
}

#[test]
fn test_rollover_crosses_month_and_year_end() {
    let r = time_until(target("00:15"), wall(2024, 12, 31, 23, 50, 0));
    assert_eq!((r.hours, r.minutes, r.seconds), (0, 25, 0));
}

#[test]
fn test_urgency_tightens_as_target_nears() {
    let now = |m| wall(2024, 1, 1, 11, m, 0);
    let lunch = target("12:00");
    let bands: Vec<Urgency> = [0, 30, 45, 55, 59]
        .into_iter()
        .map(|m| Urgency::of(&time_until(lunch, now(m))))
        .collect();
    assert_eq!(
        bands,
        vec![
            Urgency::Relaxed,
            Urgency::Near,
            Urgency::Soon,
            Urgency::Imminent,
            Urgency::Imminent
        ]
    );
}

#[test]
fn test_countdown_phrase_with_and_without_event() {
    let r = time_until(target("11:30"), wall(2024, 3, 4, 9, 25, 0));
    assert_eq!(
        countdown_phrase(&r, Some("Lunsj"), Language::Norwegian),
        "Lunsj er om 2 timer og 5 minutter"
    );
    assert_eq!(
        countdown_phrase(&r, None, Language::English),
        "2 hours and 5 minutes left"
    );
    // Blank event names are ignored
    assert_eq!(
        countdown_phrase(&r, Some("  "), Language::English),
        "2 hours and 5 minutes left"
    );
}
