// Daily routines screen

use crate::engine::moment::Moment;
use crate::engine::narration::{Language, until_label};
use crate::ui::state::RoutinesState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub struct RoutinesScreen;

impl RoutinesScreen {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        routines: &RoutinesState,
        now: Moment,
        language: Language,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let now = now.naive();
        let current = routines.book.current(now).map(|r| r.id);
        let upcoming: Vec<_> = routines.book.upcoming(now).iter().map(|r| r.id).collect();

        let rows: Vec<Row> = routines
            .book
            .sorted()
            .into_iter()
            .map(|routine| {
                let marker = if Some(routine.id) == current { "▶" } else { " " };
                let style = if Some(routine.id) == current {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if upcoming.contains(&routine.id) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(routine.time().to_string()),
                    Cell::from(routine.icon.clone()),
                    Cell::from(routine.name.clone()),
                    Cell::from(until_label(&routine.time_until(now), language)),
                ])
                .style(style)
            })
            .collect();

        let title = match language {
            Language::Norwegian => " Dagsrytme ",
            Language::English => " Routines ",
        };
        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(12),
            ],
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut table_state = TableState::default();
        if !routines.book.is_empty() {
            table_state.select(Some(routines.selected));
        }
        frame.render_stateful_widget(table, chunks[0], &mut table_state);

        Self::render_draft(frame, chunks[1], routines, language);
    }

    fn render_draft(frame: &mut Frame, area: Rect, routines: &RoutinesState, language: Language) {
        let block = Block::default().borders(Borders::ALL);
        let line = match &routines.draft {
            Some(draft) => {
                let label = match language {
                    Language::Norwegian => "Ny: ",
                    Language::English => "New: ",
                };
                Line::from(vec![
                    Span::raw(label),
                    Span::styled(
                        format!("{}▏", draft.name),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!("  {}  ", draft.time)),
                    Span::styled("(↑↓ time, Enter save, Esc cancel)", Style::default().fg(Color::DarkGray)),
                ])
            }
            None => Line::from(Span::styled(
                "[A] add  [D] delete  [-/+] 5 min  [R] reset  [Space] speak",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
