// Stepper widget: a labelled value with - / + affordances

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

pub struct Stepper {
    label: String,
    value: String,
    color: Color,
    focused: bool,
    dimmed: bool,
}

impl Stepper {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: Color::Cyan,
            focused: false,
            dimmed: false,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Shown but inactive, e.g. a ring hidden in simplified mode
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn line(&self) -> Line<'_> {
        let value_style = match (self.focused, self.dimmed) {
            (_, true) => Style::default().fg(Color::DarkGray),
            (true, false) => Style::default().fg(self.color).bold().reversed(),
            (false, false) => Style::default().fg(self.color).bold(),
        };
        let arrow_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Line::from(vec![
            Span::styled(format!("{:<9}", self.label), Style::default().fg(Color::Gray)),
            Span::styled("◀ ", arrow_style),
            Span::styled(self.value.clone(), value_style),
            Span::styled(" ▶", arrow_style),
        ])
    }
}

impl Widget for Stepper {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = self.line();
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
