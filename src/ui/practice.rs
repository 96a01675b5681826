// Practice screen: read the clock or set it

use crate::engine::hands::HandAngles;
use crate::engine::narration::{Language, clock_phrase, digital};
use crate::engine::practice::{ClockTime, QuestionKind};
use crate::ui::clock::dial::DialGeometry;
use crate::ui::clock::paint_face;
use crate::ui::constants::FACE_RADIUS;
use crate::ui::state::PracticeState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, canvas::Canvas},
};

pub struct PracticeScreen;

impl PracticeScreen {
    pub fn render(frame: &mut Frame, area: Rect, practice: &mut PracticeState, language: Language) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let session = &practice.session;
        let shown = match session.kind {
            QuestionKind::Read => session.current.target,
            QuestionKind::Set => practice.guess,
        };

        let block = Block::default().borders(Borders::ALL).title(match session.kind {
            QuestionKind::Read => " Hva er klokka? / What time is it? ",
            QuestionKind::Set => " Still klokka / Set the clock ",
        });
        let geometry = DialGeometry::fit(block.inner(columns[0]), FACE_RADIUS + 10.0);
        let angles = HandAngles::new(shown.hours, shown.minutes, 0);
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(geometry.x_bounds)
            .y_bounds(geometry.y_bounds)
            .paint(|ctx| paint_face(ctx, angles, false));
        frame.render_widget(canvas, columns[0]);
        practice.face = Some(geometry);

        Self::render_panel(frame, columns[1], practice, language);
    }

    fn render_panel(frame: &mut Frame, area: Rect, practice: &PracticeState, language: Language) {
        let session = &practice.session;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", session.difficulty),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    "{}/{} ({}%)",
                    session.score,
                    session.total,
                    session.percent()
                )),
            ]),
            Line::from(""),
        ];

        match session.kind {
            QuestionKind::Read => {
                for (idx, option) in session.current.options.iter().enumerate() {
                    lines.push(Self::option_line(
                        *option,
                        idx == practice.choice,
                        session.answered.map(|_| session.current.is_correct(*option)),
                        language,
                    ));
                }
            }
            QuestionKind::Set => {
                let target = session.current.target;
                lines.push(Line::from(Span::styled(
                    clock_phrase(target.hours, target.minutes, language),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "{}  (↑↓ hour, ←→ 5 min)",
                    digital(practice.guess.hours, practice.guess.minutes)
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(match (session.answered, language) {
            (Some(true), Language::Norwegian) => Self::feedback("Riktig!", Color::Green),
            (Some(true), Language::English) => Self::feedback("Correct!", Color::Green),
            (Some(false), Language::Norwegian) => Self::feedback("Prøv igjen neste gang", Color::Red),
            (Some(false), Language::English) => Self::feedback("Not quite", Color::Red),
            (None, _) => Line::from(Span::styled(
                "[Enter] answer  [K] kind  [D] difficulty",
                Style::default().fg(Color::DarkGray),
            )),
        });

        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn option_line(
        option: ClockTime,
        selected: bool,
        correct: Option<bool>,
        language: Language,
    ) -> Line<'static> {
        let marker = if selected { "▶ " } else { "  " };
        let style = match correct {
            Some(true) => Style::default().fg(Color::Green),
            Some(false) if selected => Style::default().fg(Color::Red),
            _ if selected => Style::default().add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        Line::from(Span::styled(
            format!("{marker}{}", clock_phrase(option.hours, option.minutes, language)),
            style,
        ))
    }

    fn feedback(text: &'static str, color: Color) -> Line<'static> {
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }
}
