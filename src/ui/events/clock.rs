use super::*;
use crate::engine::hands::{Hand, HandAngles};
use crate::engine::narration::{ring_phrase, spoken_time};
use crate::engine::ring::ring_layout;
use crate::ui::clock::dial::{hand_under, ring_under};
use crate::ui::state::Capture;

pub(super) fn handle_clock_key(key: KeyEvent, state: &mut AppState) {
    let rings = state.visible_rings();
    let selected = state.clock.selected_ring;

    match key.code {
        KeyCode::Char(' ') => state.clock.toggle_running(),
        KeyCode::Char('n') | KeyCode::Char('N') => state.clock.set_now(Moment::now()),
        KeyCode::Up => state.clock.select_ring(&rings, -1),
        KeyCode::Down => state.clock.select_ring(&rings, 1),
        KeyCode::Left | KeyCode::Char('-') => step_and_speak(state, -1),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => step_and_speak(state, 1),
        KeyCode::Char('[') => state.clock.step_year(-1),
        KeyCode::Char(']') => state.clock.step_year(1),
        KeyCode::Char('m') | KeyCode::Char('M') => {
            let display = &mut state.config.display;
            display.simplified_mode = !display.simplified_mode;
            // Keep keyboard focus on a ring that is still shown
            let rings = state.visible_rings();
            state.clock.select_ring(&rings, 0);
            state.persist_config();
        }
        KeyCode::Char('u') | KeyCode::Char('U') => {
            state.config.display.units.toggle(selected);
            state.persist_config();
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            let display = &mut state.config.display;
            display.show_seconds_hand = !display.show_seconds_hand;
            state.persist_config();
        }
        _ => {}
    }
}

fn step_and_speak(state: &mut AppState, delta: i64) {
    let ring = state.clock.selected_ring;
    state.clock.step(ring, delta);
    state.speak(&ring_phrase(state.clock.moment, ring, state.language));
}

/// Hands that can be grabbed on the analog face
fn grabbable_hands(state: &AppState) -> Vec<Hand> {
    let mut hands = vec![Hand::Hour, Hand::Minute];
    if state.config.display.show_seconds_hand {
        hands.push(Hand::Second);
    }
    hands
}

pub(super) fn handle_clock_mouse(mouse: MouseEvent, state: &mut AppState) {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(dial) = state.clock.dial.filter(|d| d.contains(column, row)) {
                let point = dial.point(column, row);
                let layout = ring_layout(state.clock.moment, &state.visible_rings());
                if let Some(ring) = ring_under(&layout, point) {
                    if state.clock.begin_ring_drag(ring) {
                        tracing::debug!(%ring, angle = point.angle, "ring grabbed");
                        state.clock.drag_to(point.angle);
                    }
                }
            } else if let Some(face) = state.clock.face.filter(|f| f.contains(column, row)) {
                let point = face.point(column, row);
                let angles = HandAngles::of(state.clock.moment);
                if let Some(hand) = hand_under(&angles, &grabbable_hands(state), point) {
                    if state.clock.begin_hand_drag(hand) {
                        state.clock.drag_to(point.angle);
                    }
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let geometry = match state.clock.capture {
                Some(Capture::Ring(_)) => state.clock.dial,
                Some(Capture::Hand(_)) => state.clock.face,
                None => None,
            };
            if let Some(geometry) = geometry {
                state.clock.drag_to(geometry.point(column, row).angle);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let moment = state.clock.moment;
            match state.clock.end_drag() {
                Some(Capture::Ring(session)) => {
                    state.speak(&ring_phrase(moment, session.ring(), state.language));
                }
                Some(Capture::Hand(_)) => {
                    state.speak(&spoken_time(moment.hour(), moment.minute(), state.language));
                }
                None => {}
            }
        }
        _ => {}
    }
}
