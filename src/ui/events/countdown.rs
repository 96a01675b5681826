use super::*;
use crate::engine::narration::countdown_phrase;
use crate::ui::state::CountdownField;

pub(super) fn handle_countdown_key(key: KeyEvent, state: &mut AppState) {
    if state.input_mode == InputMode::Editing {
        handle_event_name_key(key, state);
        return;
    }

    match key.code {
        KeyCode::Left | KeyCode::Right => {
            state.countdown.field = match state.countdown.field {
                CountdownField::Hour => CountdownField::Minute,
                CountdownField::Minute => CountdownField::Hour,
            };
        }
        KeyCode::Up => change_target(state, 1),
        KeyCode::Down => change_target(state, -1),
        KeyCode::Enter => {
            state.countdown.active = !state.countdown.active;
            state.countdown.refresh(Moment::now());
            tracing::info!(
                target_time = %state.countdown.target,
                active = state.countdown.active,
                "countdown toggled"
            );
            speak_remaining(state);
        }
        KeyCode::Char('e') | KeyCode::Char('E') => state.input_mode = InputMode::Editing,
        KeyCode::Char(' ') => speak_remaining(state),
        _ => {}
    }
}

fn handle_event_name_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.config.countdown.event_name = state.countdown.event().map(str::to_string);
            state.persist_config();
        }
        KeyCode::Backspace => {
            state.countdown.event_name.pop();
        }
        KeyCode::Char(c) => state.countdown.event_name.push(c),
        _ => {}
    }
}

fn change_target(state: &mut AppState, delta: i32) {
    state.countdown.step(delta);
    state.countdown.refresh(Moment::now());
    state.config.countdown.hour = state.countdown.target.hour;
    state.config.countdown.minute = state.countdown.target.minute;
    state.persist_config();
}

fn speak_remaining(state: &AppState) {
    if let Some(remaining) = &state.countdown.remaining {
        let text = countdown_phrase(remaining, state.countdown.event(), state.language);
        state.speak(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, state_at};
    use super::*;

    #[test]
    fn test_start_stop_and_target_steps() {
        let mut state = state_at(Moment::new(2024, 0, 1, 8, 0, 0).unwrap());
        assert_eq!(state.countdown.target.to_string(), "12:00");

        handle_countdown_key(press(KeyCode::Up), &mut state);
        assert_eq!(state.countdown.target.to_string(), "13:00");
        handle_countdown_key(press(KeyCode::Right), &mut state);
        handle_countdown_key(press(KeyCode::Down), &mut state);
        assert_eq!(state.countdown.target.to_string(), "12:55");
        assert_eq!((state.config.countdown.hour, state.config.countdown.minute), (12, 55));

        handle_countdown_key(press(KeyCode::Enter), &mut state);
        assert!(state.countdown.active);
        assert!(state.countdown.remaining.is_some());
        handle_countdown_key(press(KeyCode::Enter), &mut state);
        assert!(!state.countdown.active);
        assert!(state.countdown.remaining.is_none());
    }

    #[test]
    fn test_event_name_editing() {
        let mut state = state_at(Moment::new(2024, 0, 1, 8, 0, 0).unwrap());
        handle_countdown_key(press(KeyCode::Char('e')), &mut state);
        for c in "Lunsjx".chars() {
            handle_countdown_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_countdown_key(press(KeyCode::Backspace), &mut state);
        handle_countdown_key(press(KeyCode::Enter), &mut state);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.countdown.event(), Some("Lunsj"));
        assert_eq!(state.config.countdown.event_name.as_deref(), Some("Lunsj"));
    }
}
