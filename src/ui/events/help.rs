use super::*;
use crate::ui::help::HelpModalState;

pub(super) fn open_help(state: &mut AppState) {
    let speech = &state.config.speech;
    state.help_modal = Some(HelpModalState::new(
        state.app_version.clone(),
        state.language,
        speech.providers.clone(),
        speech.enabled,
    ));
}

pub(super) fn handle_help_key(key: KeyEvent, state: &mut AppState) {
    if let Some(ref mut help_state) = state.help_modal {
        match key.code {
            // Close help
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                state.help_modal = None;
            }
            KeyCode::Tab | KeyCode::Right => {
                help_state.current_section = help_state.current_section.next();
                help_state.scroll_offset = 0;
            }
            KeyCode::BackTab | KeyCode::Left => {
                help_state.current_section = help_state.current_section.previous();
                help_state.scroll_offset = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                help_state.scroll_offset = help_state.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                help_state.scroll_offset = help_state
                    .scroll_offset
                    .saturating_add(1)
                    .min(help_state.max_scroll);
            }
            KeyCode::PageUp => {
                help_state.scroll_offset = help_state.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => {
                help_state.scroll_offset = help_state
                    .scroll_offset
                    .saturating_add(10)
                    .min(help_state.max_scroll);
            }
            KeyCode::Home => help_state.scroll_offset = 0,
            KeyCode::End => help_state.scroll_offset = help_state.max_scroll,
            _ => {}
        }
    }
}
