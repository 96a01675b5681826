// Clock screen: the ring dial, the analog face and the digital readout

pub mod dial;

use crate::config::DisplayConfig;
use crate::engine::calendar::{days_in_month, is_leap_year};
use crate::engine::hands::{HandAngles, hand_tip};
use crate::engine::moment::Moment;
use crate::engine::narration::{Language, formatted_date, month_name, spoken_time};
use crate::engine::ring::{RingName, RingSpec, angle_for_value, ring_layout};
use crate::ui::constants::*;
use crate::ui::state::{Capture, ClockState};
use crate::ui::widgets::Stepper;
use dial::DialGeometry;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    },
};

// Degrees between sampled points along a ring arc
const ARC_STEP: f64 = 1.5;

pub struct ClockScreen;

impl ClockScreen {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        clock: &mut ClockState,
        display: &DisplayConfig,
        language: Language,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Min(12)])
            .split(columns[1]);

        let rings = display.visible_rings();
        clock.dial = Some(Self::render_dial(frame, columns[0], clock, &rings, display));
        clock.face = Some(Self::render_face(
            frame,
            right[0],
            clock.moment,
            display.show_seconds_hand,
        ));
        Self::render_readout(frame, right[1], clock, display, language);
    }

    fn render_dial(
        frame: &mut Frame,
        area: Rect,
        clock: &ClockState,
        rings: &[RingName],
        display: &DisplayConfig,
    ) -> DialGeometry {
        let moment = clock.moment;
        let layout = ring_layout(moment, rings);
        let held = match clock.capture {
            Some(Capture::Ring(session)) => Some(session.ring()),
            _ => None,
        };
        let leap_marker = is_leap_year(moment.year()) && !display.simplified_mode;

        let title = if clock.running { " Year clock ▶ " } else { " Year clock ⏸ " };
        let block = Block::default().borders(Borders::ALL).title(title);
        let geometry = DialGeometry::fit(block.inner(area), dial_radius(rings.len()));

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(geometry.x_bounds)
            .y_bounds(geometry.y_bounds)
            .paint(|ctx| {
                for spec in &layout {
                    paint_ring(ctx, spec, held == Some(spec.name));
                }
                ctx.layer();
                for spec in &layout {
                    paint_ring_label(ctx, spec);
                }
                if leap_marker {
                    paint_leap_day(ctx, &layout);
                }
                ctx.print(
                    -12.0,
                    0.0,
                    Span::styled(
                        format!("{}", moment.year()),
                        Style::default().fg(YEAR_COLOR).add_modifier(Modifier::BOLD),
                    ),
                );
            });

        frame.render_widget(canvas, area);
        geometry
    }

    fn render_face(frame: &mut Frame, area: Rect, moment: Moment, show_seconds: bool) -> DialGeometry {
        let block = Block::default().borders(Borders::ALL).title(" Analog ");
        let geometry = DialGeometry::fit(block.inner(area), FACE_RADIUS + 10.0);
        let angles = HandAngles::of(moment);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(geometry.x_bounds)
            .y_bounds(geometry.y_bounds)
            .paint(|ctx| paint_face(ctx, angles, show_seconds));

        frame.render_widget(canvas, area);
        geometry
    }

    fn render_readout(
        frame: &mut Frame,
        area: Rect,
        clock: &ClockState,
        display: &DisplayConfig,
        language: Language,
    ) {
        let moment = clock.moment;
        let block = Block::default().borders(Borders::ALL).title(" Time ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let leap = if is_leap_year(moment.year()) {
            match language {
                Language::Norwegian => "  skuddår",
                Language::English => "  leap year",
            }
        } else {
            ""
        };

        let header = vec![
            Line::from(Span::styled(
                format!("{:02}:{:02}:{:02}", moment.hour(), moment.minute(), moment.second()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(spoken_time(moment.hour(), moment.minute(), language)),
            Line::from(vec![
                Span::raw(formatted_date(moment, language)),
                Span::styled(leap, Style::default().fg(LEAP_DAY_COLOR)),
            ]),
        ];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);

        frame.render_widget(
            Stepper::new(year_label(language), moment.year().to_string()).color(YEAR_COLOR),
            rows[1],
        );
        for (idx, ring) in RingName::ALL.into_iter().enumerate() {
            let hidden = display.simplified_mode && !display.units.is_shown(ring);
            let stepper = Stepper::new(ring_label(ring, language), ring_value_text(moment, ring, language))
                .color(ring_color(ring))
                .focused(clock.selected_ring == ring)
                .dimmed(hidden);
            frame.render_widget(stepper, rows[idx + 2]);
        }
    }
}

fn year_label(language: Language) -> &'static str {
    match language {
        Language::Norwegian => "År",
        Language::English => "Year",
    }
}

pub fn ring_label(ring: RingName, language: Language) -> &'static str {
    match (ring, language) {
        (RingName::Months, Language::Norwegian) => "Måned",
        (RingName::Months, Language::English) => "Month",
        (RingName::Days, Language::Norwegian) => "Dag",
        (RingName::Days, Language::English) => "Day",
        (RingName::Hours, Language::Norwegian) => "Time",
        (RingName::Hours, Language::English) => "Hour",
        (RingName::Minutes, Language::Norwegian) => "Minutt",
        (RingName::Minutes, Language::English) => "Minute",
        (RingName::Seconds, Language::Norwegian) => "Sekund",
        (RingName::Seconds, Language::English) => "Second",
    }
}

fn ring_value_text(moment: Moment, ring: RingName, language: Language) -> String {
    match ring {
        RingName::Months => month_name(moment.month(), language).to_string(),
        RingName::Days => format!(
            "{:02} / {}",
            moment.day(),
            days_in_month(moment.year(), moment.month())
        ),
        RingName::Hours => format!("{:02}", moment.hour()),
        RingName::Minutes => format!("{:02}", moment.minute()),
        RingName::Seconds => format!("{:02}", moment.second()),
    }
}

fn arc_points(radius: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut angle = from;
    while angle < to {
        points.push(hand_tip(angle, radius));
        angle += ARC_STEP;
    }
    points
}

/// A ring band filled clockwise from 12 o'clock through the current value.
fn paint_ring(ctx: &mut Context, spec: &RingSpec, held: bool) {
    let filled_to = (spec.value + 1) as f64 * 360.0 / spec.count as f64;
    let color = if held { Color::White } else { ring_color(spec.name) };

    for offset in [4.0, 10.0, 16.0] {
        let radius = spec.radius - offset;
        let filled = arc_points(radius, 0.0, filled_to);
        let empty = arc_points(radius, filled_to, 360.0);
        ctx.draw(&Points {
            coords: &filled,
            color,
        });
        ctx.draw(&Points {
            coords: &empty,
            color: EMPTY_SEGMENT_COLOR,
        });
    }
}

fn paint_ring_label(ctx: &mut Context, spec: &RingSpec) {
    // Months and days are shown 1-based
    let shown = match spec.name {
        RingName::Months | RingName::Days => spec.value + 1,
        _ => spec.value,
    };
    let angle = angle_for_value(spec.value, spec.count);
    let (x, y) = hand_tip(angle, spec.radius + 6.0);
    ctx.print(
        x,
        y,
        Span::styled(
            shown.to_string(),
            Style::default()
                .fg(ring_color(spec.name))
                .add_modifier(Modifier::BOLD),
        ),
    );
}

/// Marks where February 29 sits on the day ring of a leap year.
fn paint_leap_day(ctx: &mut Context, layout: &[RingSpec]) {
    let Some(days) = layout.iter().find(|s| s.name == RingName::Days) else {
        return;
    };
    // February spans 30..60 degrees of the year; day 29 is its last slot
    let angle = 30.0 + 28.0 * 30.0 / 29.0;
    let (x1, y1) = hand_tip(angle, days.radius - RING_THICKNESS);
    let (x2, y2) = hand_tip(angle, days.radius + 10.0);
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color: LEAP_DAY_COLOR,
    });
    let (tx, ty) = hand_tip(angle, days.radius + 20.0);
    ctx.print(tx, ty, Span::styled("29.2", Style::default().fg(LEAP_DAY_COLOR)));
}

/// Analog face with numerals and hands, centred on the origin.
pub fn paint_face(ctx: &mut Context, angles: HandAngles, show_seconds: bool) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: FACE_RADIUS,
        color: Color::Gray,
    });
    for n in 1..=12u32 {
        let (x, y) = hand_tip(n as f64 * 30.0, FACE_RADIUS - 15.0);
        ctx.print(x - 3.0, y, Line::from(n.to_string()));
    }
    ctx.layer();

    let mut hands = vec![
        (angles.hour, HOUR_HAND_LENGTH, HOURS_COLOR),
        (angles.minute, MINUTE_HAND_LENGTH, MINUTES_COLOR),
    ];
    if show_seconds {
        hands.push((angles.second, SECOND_HAND_LENGTH, SECONDS_COLOR));
    }
    for (angle, length, color) in hands {
        let (x2, y2) = hand_tip(angle, length);
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: 0.0,
            x2,
            y2,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_arc_points_cover_requested_span() {
        let points = arc_points(100.0, 0.0, 90.0);
        assert_eq!(points.len(), 60);
        let (x, y) = points[0];
        assert!(x.abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
        assert!(arc_points(100.0, 90.0, 90.0).is_empty());
    }

    #[test]
    fn test_render_records_geometry() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut clock = ClockState::new(Moment::new(2024, 1, 29, 9, 25, 0).unwrap(), false);
        let display = DisplayConfig::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                ClockScreen::render(frame, area, &mut clock, &display, Language::English)
            })
            .unwrap();

        let dial = clock.dial.expect("dial geometry");
        assert_eq!(dial.area, Rect::new(1, 1, 58, 28));
        assert!(clock.face.is_some());
    }

    #[test]
    fn test_ring_labels() {
        assert_eq!(ring_label(RingName::Minutes, Language::Norwegian), "Minutt");
        let m = Moment::new(2023, 1, 5, 7, 3, 0).unwrap();
        assert_eq!(ring_value_text(m, RingName::Days, Language::English), "05 / 28");
        assert_eq!(ring_value_text(m, RingName::Months, Language::Norwegian), "februar");
    }
}
