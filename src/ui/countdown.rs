// Countdown screen

use crate::engine::countdown::Urgency;
use crate::engine::narration::{Language, countdown_phrase};
use crate::ui::state::{CountdownField, CountdownState, InputMode};
use crate::ui::widgets::{Stepper, UrgencyBar, urgency_color};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct CountdownScreen;

impl CountdownScreen {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        countdown: &CountdownState,
        input_mode: InputMode,
        language: Language,
    ) {
        let title = match language {
            Language::Norwegian => " Nedtelling ",
            Language::English => " Countdown ",
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Event name
                Constraint::Length(1), // Hour
                Constraint::Length(1), // Minute
                Constraint::Length(1),
                Constraint::Length(3), // Big remaining
                Constraint::Length(1), // Bar
                Constraint::Length(1),
                Constraint::Length(2), // Phrase
                Constraint::Min(0),
            ])
            .margin(1)
            .split(inner);

        Self::render_event_name(frame, chunks[0], countdown, input_mode, language);

        let (hour_label, minute_label) = match language {
            Language::Norwegian => ("Time", "Minutt"),
            Language::English => ("Hour", "Minute"),
        };
        frame.render_widget(
            Stepper::new(hour_label, format!("{:02}", countdown.target.hour))
                .focused(countdown.field == CountdownField::Hour),
            chunks[1],
        );
        frame.render_widget(
            Stepper::new(minute_label, format!("{:02}", countdown.target.minute))
                .focused(countdown.field == CountdownField::Minute),
            chunks[2],
        );

        match &countdown.remaining {
            Some(remaining) if countdown.active => {
                let color = urgency_color(Urgency::of(remaining));
                let big = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(
                            "{:02}:{:02}:{:02}",
                            remaining.hours, remaining.minutes, remaining.seconds
                        ),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(big, chunks[4]);
                frame.render_widget(UrgencyBar::new(remaining), chunks[5]);

                let phrase = countdown_phrase(remaining, countdown.event(), language);
                frame.render_widget(
                    Paragraph::new(phrase).alignment(Alignment::Center),
                    chunks[7],
                );
            }
            _ => {
                let hint = match language {
                    Language::Norwegian => "Trykk Enter for å starte",
                    Language::English => "Press Enter to start",
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        hint,
                        Style::default().fg(Color::DarkGray),
                    )))
                    .alignment(Alignment::Center),
                    chunks[4],
                );
            }
        }
    }

    fn render_event_name(
        frame: &mut Frame,
        area: Rect,
        countdown: &CountdownState,
        input_mode: InputMode,
        language: Language,
    ) {
        let label = match language {
            Language::Norwegian => "Hendelse ",
            Language::English => "Event    ",
        };
        let editing = input_mode == InputMode::Editing;
        let value = if editing {
            format!("{}▏", countdown.event_name)
        } else if countdown.event_name.is_empty() {
            "-".to_string()
        } else {
            countdown.event_name.clone()
        };
        let style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(label), Span::styled(value, style)])),
            area,
        );
    }
}
