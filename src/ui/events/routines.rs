use super::*;
use crate::engine::countdown::TimeOfDay;
use crate::engine::narration::routine_phrase;
use crate::engine::routine::RoutineUpdate;
use crate::ui::state::RoutineDraft;

pub(super) fn handle_routines_key(key: KeyEvent, state: &mut AppState) {
    if state.routines.draft.is_some() {
        handle_draft_key(key, state);
        return;
    }

    match key.code {
        KeyCode::Up => state.routines.select(-1),
        KeyCode::Down => state.routines.select(1),
        KeyCode::Char('-') => shift_selected(state, -5),
        KeyCode::Char('+') | KeyCode::Char('=') => shift_selected(state, 5),
        KeyCode::Char('a') | KeyCode::Char('A') => {
            let now = state.clock.moment;
            // Start the draft at the clock's time, rounded down to five minutes
            let time = TimeOfDay {
                hour: now.hour(),
                minute: now.minute() - now.minute() % 5,
            };
            state.routines.draft = Some(RoutineDraft {
                name: String::new(),
                time,
            });
            state.input_mode = InputMode::Editing;
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if let Some(id) = state.routines.selected_id() {
                if let Ok(removed) = state.routines.book.remove(id) {
                    tracing::info!(name = %removed.name, "routine removed");
                    state.routines.select(0);
                    state.routines.save();
                }
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.routines.book.reset();
            state.routines.selected = 0;
            state.routines.save();
        }
        KeyCode::Char(' ') => {
            let now = Moment::now().naive();
            let text = state
                .routines
                .book
                .sorted()
                .get(state.routines.selected)
                .map(|r| routine_phrase(&r.name, r.hours, r.minutes, &r.time_until(now), state.language));
            if let Some(text) = text {
                state.speak(&text);
            }
        }
        _ => {}
    }
}

fn shift_selected(state: &mut AppState, minutes: i32) {
    let Some(id) = state.routines.selected_id() else {
        return;
    };
    let Some(time) = state
        .routines
        .book
        .routines
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.time().step_minutes(minutes))
    else {
        return;
    };
    let update = RoutineUpdate {
        time: Some(time),
        ..RoutineUpdate::default()
    };
    if state.routines.book.update(id, update).is_ok() {
        follow(state, id);
        state.routines.save();
    }
}

/// Keep the highlight on `id` after the time order changed.
fn follow(state: &mut AppState, id: uuid::Uuid) {
    if let Some(idx) = state.routines.book.sorted().iter().position(|r| r.id == id) {
        state.routines.selected = idx;
    }
}

fn handle_draft_key(key: KeyEvent, state: &mut AppState) {
    let Some(draft) = state.routines.draft.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            state.routines.draft = None;
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let draft = draft.clone();
            match state.routines.book.add(&draft.name, draft.time, None) {
                Ok(id) => {
                    tracing::info!(name = %draft.name.trim(), time = %draft.time, "routine added");
                    state.routines.draft = None;
                    state.input_mode = InputMode::Normal;
                    follow(state, id);
                    state.routines.save();
                }
                // A blank name keeps the draft open
                Err(e) => tracing::debug!("{e}"),
            }
        }
        KeyCode::Up => draft.time = draft.time.step_minutes(5),
        KeyCode::Down => draft.time = draft.time.step_minutes(-5),
        KeyCode::PageUp => draft.time = draft.time.step_minutes(60),
        KeyCode::PageDown => draft.time = draft.time.step_minutes(-60),
        KeyCode::Backspace => {
            draft.name.pop();
        }
        KeyCode::Char(c) => draft.name.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, state_at};
    use super::*;

    fn state() -> AppState {
        state_at(Moment::new(2024, 0, 1, 9, 37, 0).unwrap())
    }

    #[test]
    fn test_add_routine_through_draft() {
        let mut state = state();
        let before = state.routines.book.routines.len();

        handle_routines_key(press(KeyCode::Char('a')), &mut state);
        assert_eq!(state.input_mode, InputMode::Editing);
        assert_eq!(state.routines.draft.as_ref().map(|d| d.time.to_string()), Some("09:35".into()));

        // Blank names are rejected and the draft stays open
        handle_routines_key(press(KeyCode::Enter), &mut state);
        assert!(state.routines.draft.is_some());

        for c in "Piano".chars() {
            handle_routines_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_routines_key(press(KeyCode::Up), &mut state);
        handle_routines_key(press(KeyCode::Enter), &mut state);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.routines.book.routines.len(), before + 1);
        let selected = state.routines.book.sorted()[state.routines.selected].clone();
        assert_eq!(selected.name, "Piano");
        assert_eq!(selected.time().to_string(), "09:40");
    }

    #[test]
    fn test_shift_and_delete_selected() {
        let mut state = state();
        let first = state.routines.book.sorted()[0].clone();

        handle_routines_key(press(KeyCode::Char('+')), &mut state);
        let moved = state.routines.book.routines.iter().find(|r| r.id == first.id).unwrap();
        assert_eq!(moved.start_minute(), first.start_minute() + 5);
        assert_eq!(state.routines.selected_id(), Some(first.id));

        let before = state.routines.book.routines.len();
        handle_routines_key(press(KeyCode::Char('d')), &mut state);
        assert_eq!(state.routines.book.routines.len(), before - 1);
        assert!(state.routines.book.routines.iter().all(|r| r.id != first.id));

        handle_routines_key(press(KeyCode::Char('r')), &mut state);
        assert_eq!(state.routines.book.routines.len(), before);
    }
}
