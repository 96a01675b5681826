// Countdown bar colored by urgency

use crate::engine::countdown::{Remaining, Urgency};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// The bar empties over the final hour before the target.
const BAR_SPAN_MINUTES: f64 = 60.0;

pub fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Relaxed => Color::Rgb(102, 126, 234),
        Urgency::Near => Color::Rgb(39, 174, 96),
        Urgency::Soon => Color::Rgb(243, 156, 18),
        Urgency::Imminent => Color::Rgb(231, 76, 60),
    }
}

pub struct UrgencyBar {
    ratio: f64,
    urgency: Urgency,
}

impl UrgencyBar {
    pub fn new(remaining: &Remaining) -> Self {
        let minutes = remaining.total_ms.max(0) as f64 / 60_000.0;
        Self {
            ratio: (minutes / BAR_SPAN_MINUTES).clamp(0.0, 1.0),
            urgency: Urgency::of(remaining),
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Widget for UrgencyBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filled_width = (area.width as f64 * self.ratio).round() as u16;
        let color = urgency_color(self.urgency);

        for row in area.y..area.y + area.height {
            for x in 0..area.width {
                let (symbol, fg) = if x < filled_width {
                    ("█", color)
                } else {
                    ("░", Color::DarkGray)
                };
                buf.set_string(area.x + x, row, symbol, Style::default().fg(fg));
            }
        }
    }
}
