// Help modal implementation

use super::navigation::{HelpModalState, HelpSection};
use crate::engine::narration::{Language, clock_phrase, spoken_time};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpModal;

fn heading(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn key(keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(action.to_string()),
    ])
}

impl HelpModal {
    pub fn render(frame: &mut Frame, state: &mut HelpModalState) {
        let area = frame.area();

        // 80% width, 90% height, with a floor
        let modal_width = ((area.width * 80) / 100).max(60).min(area.width);
        let modal_height = ((area.height * 90) / 100).max(20).min(area.height);

        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2,
            y: (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("Help - {}", state.current_section.title()))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Section tabs
                Constraint::Min(5),    // Content
                Constraint::Length(1), // Navigation hints
            ])
            .split(inner);

        Self::render_tabs(frame, chunks[0], state.current_section);

        let content = Self::section_content(state);
        let viewport_height = chunks[1].height;

        state.max_scroll = (content.len() as u16).saturating_sub(viewport_height);
        state.scroll_offset = state.scroll_offset.min(state.max_scroll);

        let visible: Vec<Line> = content
            .into_iter()
            .skip(state.scroll_offset as usize)
            .take(viewport_height as usize)
            .collect();

        let paragraph = Paragraph::new(visible)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);

        Self::render_footer(frame, chunks[2], state);
    }

    fn render_tabs(frame: &mut Frame, area: Rect, current: HelpSection) {
        let mut spans = Vec::new();
        for (i, section) in HelpSection::all_sections().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if *section == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(section.title().to_string(), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(frame: &mut Frame, area: Rect, state: &HelpModalState) {
        let mut hints = vec![
            Span::styled("[Tab/Arrows]", Style::default().fg(Color::Yellow)),
            Span::raw(" Switch  "),
            Span::styled("[↑↓/jk]", Style::default().fg(Color::Yellow)),
            Span::raw(" Scroll  "),
            Span::styled("[Esc/H]", Style::default().fg(Color::Yellow)),
            Span::raw(" Close"),
        ];

        if state.scroll_offset > 0 {
            hints.insert(0, Span::styled("↑ ", Style::default().fg(Color::Cyan)));
        }
        if state.scroll_offset < state.max_scroll {
            hints.push(Span::styled(" ↓", Style::default().fg(Color::Cyan)));
        }

        let footer = Paragraph::new(Line::from(hints))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(footer, area);
    }

    pub fn section_content(state: &HelpModalState) -> Vec<Line<'static>> {
        match state.current_section {
            HelpSection::About => Self::about_content(state),
            HelpSection::RingClock => Self::ring_clock_content(),
            HelpSection::Countdown => Self::countdown_content(),
            HelpSection::Routines => Self::routines_content(),
            HelpSection::Practice => Self::practice_content(state.language),
            HelpSection::Calendar => Self::calendar_content(),
            HelpSection::KeyboardShortcuts => Self::keyboard_shortcuts_content(),
        }
    }

    fn about_content(state: &HelpModalState) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![Span::styled(
                "Tidstreneren - the time trainer",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Version:  {}", state.app_version)),
            Line::from(format!("Language: {}", state.language)),
            Line::from(""),
            Line::from("Learn to read analog and digital time: drag the rings of the"),
            Line::from("year clock, move the hands of the analog face and hear the"),
            Line::from("time read aloud."),
            Line::from(""),
            heading("Speech:"),
        ];

        if !state.speech_enabled {
            lines.push(Line::from("  Disabled in config ([speech] enabled = false)"));
        } else if state.speech_providers.is_empty() {
            lines.push(Line::from("  No providers configured"));
        } else {
            for (idx, provider) in state.speech_providers.iter().enumerate() {
                lines.push(Line::from(format!("  {}. {}", idx + 1, provider)));
            }
        }
        lines
    }

    fn ring_clock_content() -> Vec<Line<'static>> {
        vec![
            heading("The year clock"),
            Line::from(""),
            Line::from("Each ring is one part of the date and time, from the inside out:"),
            Line::from("months, days, hours, minutes and seconds. A filled ring shows"),
            Line::from("how far through that unit we are."),
            Line::from(""),
            Line::from("Drag a ring with the mouse to change it. Dragging the month ring"),
            Line::from("past December into January moves to the next year, and back"),
            Line::from("again moves to the previous year."),
            Line::from(""),
            Line::from("Days that do not exist are carried forward: moving January 31"),
            Line::from("to February lands in early March."),
            Line::from(""),
            heading("The analog face"),
            Line::from(""),
            Line::from("Drag the hour, minute or second hand. The hour hand keeps"),
            Line::from("morning or afternoon as it was."),
        ]
    }

    fn countdown_content() -> Vec<Line<'static>> {
        vec![
            heading("Countdown"),
            Line::from(""),
            Line::from("Pick a time of day and start the countdown. A time that has"),
            Line::from("already passed today counts down to the same time tomorrow."),
            Line::from(""),
            Line::from("The bar changes color as the time gets close:"),
            Line::from(vec![
                Span::styled("  more than 30 min  ", Style::default().fg(Color::Blue)),
                Span::styled("30 min  ", Style::default().fg(Color::Green)),
                Span::styled("15 min  ", Style::default().fg(Color::Yellow)),
                Span::styled("5 min", Style::default().fg(Color::Red)),
            ]),
        ]
    }

    fn routines_content() -> Vec<Line<'static>> {
        vec![
            heading("Daily routines"),
            Line::from(""),
            Line::from("The routine happening now is marked with ▶, and routines"),
            Line::from("starting within 30 minutes are highlighted."),
            Line::from(""),
            Line::from("Routines are saved to routines.json next to config.toml."),
        ]
    }

    fn practice_content(language: Language) -> Vec<Line<'static>> {
        let example = |h, m| {
            format!(
                "  {:<6} {:<16} {}",
                format!("{}:{:02}", h, m),
                clock_phrase(h, m, language),
                spoken_time(h, m, language)
            )
        };
        vec![
            heading("Practice"),
            Line::from(""),
            Line::from("Read the clock and pick the right phrase, or set the clock to"),
            Line::from("match a phrase."),
            Line::from(""),
            Line::from("  Easy:   whole and half hours"),
            Line::from("  Medium: quarter hours"),
            Line::from("  Hard:   every five minutes"),
            Line::from(""),
            heading("Examples"),
            Line::from(example(3, 15)),
            Line::from(example(8, 30)),
            Line::from(example(9, 25)),
            Line::from(example(10, 45)),
        ]
    }

    fn calendar_content() -> Vec<Line<'static>> {
        vec![
            heading("Calendar"),
            Line::from(""),
            Line::from("Weeks start on Monday and carry their ISO week number."),
            Line::from("Important dates from config.toml are marked with ★ and show"),
            Line::from("how many days are left."),
            Line::from(""),
            Line::from("Press Enter to move the clock to the selected day."),
        ]
    }

    fn keyboard_shortcuts_content() -> Vec<Line<'static>> {
        vec![
            heading("Everywhere"),
            key("Tab/Shift+Tab", "Next / previous screen"),
            key("1-5", "Jump to a screen"),
            key("L", "Switch language"),
            key("V", "Say the time"),
            key("H", "Help"),
            key("Q / Ctrl+C", "Quit"),
            Line::from(""),
            heading("Clock"),
            key("Space", "Start / stop the clock"),
            key("N", "Set to now"),
            key("↑ ↓", "Select ring"),
            key("← → / - +", "Step the selected ring"),
            key("[ ]", "Step the year"),
            key("M", "Simplified mode"),
            key("U", "Show / hide selected ring in simplified mode"),
            key("S", "Show / hide the second hand"),
            Line::from(""),
            heading("Countdown"),
            key("← →", "Choose hour or minute"),
            key("↑ ↓", "Change the target"),
            key("Enter", "Start / stop"),
            key("E", "Edit the event name"),
            key("Space", "Say the time left"),
            Line::from(""),
            heading("Routines"),
            key("↑ ↓", "Select"),
            key("- +", "Move five minutes"),
            key("A", "Add"),
            key("D", "Delete"),
            key("R", "Restore defaults"),
            key("Space", "Say the routine"),
            Line::from(""),
            heading("Practice"),
            key("↑ ↓ / ← →", "Choose answer or set the clock"),
            key("Enter", "Answer, then next question"),
            key("K", "Read / set the clock"),
            key("D", "Difficulty"),
            Line::from(""),
            heading("Calendar"),
            key("Arrows", "Move by day or week"),
            key("PgUp/PgDn", "Previous / next month"),
            key("T", "Today"),
            key("Enter", "Move the clock to this day"),
        ]
    }
}
