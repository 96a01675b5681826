use super::*;
use crate::engine::narration::clock_phrase;
use crate::engine::practice::{ClockTime, QuestionKind};
use crate::engine::ring::value_for_angle;
use crate::ui::constants::HOUR_HAND_LENGTH;

pub(super) fn handle_practice_key(key: KeyEvent, state: &mut AppState) {
    let practice = &mut state.practice;
    let kind = practice.session.kind;
    let difficulty = practice.session.difficulty;

    match key.code {
        KeyCode::Enter => {
            if practice.session.answered.is_some() {
                practice.next_question();
            } else {
                practice.submit();
            }
        }
        KeyCode::Char('k') | KeyCode::Char('K') => {
            let kind = match kind {
                QuestionKind::Read => QuestionKind::Set,
                QuestionKind::Set => QuestionKind::Read,
            };
            practice.reconfigure(kind, difficulty);
        }
        KeyCode::Char('d') | KeyCode::Char('D') => practice.reconfigure(kind, difficulty.next()),
        KeyCode::Char(' ') => {
            let target = practice.session.current.target;
            let text = clock_phrase(target.hours, target.minutes, state.language);
            state.speak(&text);
        }
        // Answers are locked once given
        _ if practice.session.answered.is_some() => {}
        KeyCode::Up | KeyCode::Down if kind == QuestionKind::Read => {
            let len = practice.session.current.options.len().max(1);
            let delta = if key.code == KeyCode::Up { len - 1 } else { 1 };
            practice.choice = (practice.choice + delta) % len;
        }
        KeyCode::Up => practice.adjust_guess(1, 0),
        KeyCode::Down => practice.adjust_guess(-1, 0),
        KeyCode::Left => practice.adjust_guess(0, -5),
        KeyCode::Right => practice.adjust_guess(0, 5),
        _ => {}
    }
}

/// Set-the-clock questions accept pointer input on the face: near the
/// centre moves the hour hand, further out the minute hand in 5-minute steps.
pub(super) fn handle_practice_mouse(mouse: MouseEvent, state: &mut AppState) {
    let practice = &mut state.practice;
    if practice.session.kind != QuestionKind::Set || practice.session.answered.is_some() {
        return;
    }
    if !matches!(
        mouse.kind,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
    ) {
        return;
    }
    let Some(face) = practice.face.filter(|f| f.contains(mouse.column, mouse.row)) else {
        return;
    };

    let point = face.point(mouse.column, mouse.row);
    let guess = practice.guess;
    practice.guess = if point.distance <= HOUR_HAND_LENGTH + 10.0 {
        let hour = value_for_angle(point.angle, 12);
        ClockTime::new(if hour == 0 { 12 } else { hour }, guess.minutes)
    } else {
        // Half a step forward so the nearest mark wins
        let minutes = value_for_angle(point.angle + 15.0, 12) * 5;
        ClockTime::new(guess.hours, minutes)
    };
}

#[cfg(test)]
mod tests {
    use super::super::tests::{mouse, press, state_at};
    use super::*;
    use crate::engine::practice::Difficulty;
    use crate::ui::clock::dial::DialGeometry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        let mut state = state_at(Moment::new(2024, 0, 1, 9, 0, 0).unwrap());
        state.practice = crate::ui::state::PracticeState::new(StdRng::seed_from_u64(7));
        state
    }

    #[test]
    fn test_read_question_answer_and_advance() {
        let mut state = state();
        let correct = state
            .practice
            .session
            .current
            .options
            .iter()
            .position(|o| *o == state.practice.session.current.target)
            .unwrap();
        for _ in 0..correct {
            handle_practice_key(press(KeyCode::Down), &mut state);
        }
        handle_practice_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.practice.session.answered, Some(true));
        assert_eq!(state.practice.session.score, 1);

        // Arrows do nothing once answered
        handle_practice_key(press(KeyCode::Down), &mut state);
        assert_eq!(state.practice.choice, correct);

        handle_practice_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.practice.session.answered, None);
        assert_eq!(state.practice.choice, 0);
    }

    #[test]
    fn test_kind_and_difficulty_keys() {
        let mut state = state();
        handle_practice_key(press(KeyCode::Char('k')), &mut state);
        assert_eq!(state.practice.session.kind, QuestionKind::Set);
        handle_practice_key(press(KeyCode::Char('d')), &mut state);
        assert_eq!(state.practice.session.difficulty, Difficulty::Medium);
        assert_eq!(state.practice.session.kind, QuestionKind::Set);
    }

    #[test]
    fn test_set_the_clock_by_keys_and_pointer() {
        let mut state = state();
        handle_practice_key(press(KeyCode::Char('k')), &mut state);
        handle_practice_key(press(KeyCode::Up), &mut state);
        handle_practice_key(press(KeyCode::Right), &mut state);
        assert_eq!(state.practice.guess, ClockTime::new(1, 5));

        state.practice.face = Some(DialGeometry::fit(Rect::new(0, 0, 21, 11), 110.0));
        // Far out at 6 o'clock moves the minute hand to :30
        handle_practice_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), &mut state);
        assert_eq!(state.practice.guess, ClockTime::new(1, 30));
        // Near the centre at 3 o'clock moves the hour hand
        handle_practice_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 13, 5), &mut state);
        assert_eq!(state.practice.guess, ClockTime::new(3, 30));
    }
}
