use super::*;
use crate::engine::narration::spoken_date;
use crate::ui::state::CalendarState;

pub(super) fn handle_calendar_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Left => state.calendar.step_day(-1),
        KeyCode::Right => state.calendar.step_day(1),
        KeyCode::Up => state.calendar.step_day(-7),
        KeyCode::Down => state.calendar.step_day(7),
        KeyCode::PageUp => state.calendar.step_month(-1),
        KeyCode::PageDown => state.calendar.step_month(1),
        KeyCode::Char('t') | KeyCode::Char('T') => {
            state.calendar = CalendarState::at(state.clock.moment);
        }
        KeyCode::Enter => {
            let moment = state.calendar.selected_moment(state.clock.moment);
            state.clock.set_now(moment);
            tracing::info!(%moment, "clock moved to calendar date");
            state.speak(&spoken_date(moment, state.language));
            state.current_screen = Screen::Clock;
        }
        KeyCode::Char(' ') => {
            let moment = state.calendar.selected_moment(state.clock.moment);
            state.speak(&spoken_date(moment, state.language));
        }
        _ => {}
    }
}
