// Calendar screen

use crate::config::Config;
use crate::engine::calendar::{MonthGrid, day_distance};
use crate::engine::moment::Moment;
use crate::engine::narration::{Language, day_distance_phrase, formatted_date, month_name};
use crate::ui::state::CalendarState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const WEEKDAYS_NO: [&str; 7] = ["ma", "ti", "on", "to", "fr", "lø", "sø"];
const WEEKDAYS_EN: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub struct CalendarScreen;

impl CalendarScreen {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        calendar: &CalendarState,
        today: Moment,
        config: &Config,
        language: Language,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(20)])
            .split(area);

        let grid = MonthGrid::new(calendar.year, calendar.month);
        Self::render_grid(frame, columns[0], &grid, calendar, today, config, language);
        Self::render_details(frame, columns[1], calendar, today, config, language);
    }

    fn render_grid(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        calendar: &CalendarState,
        today: Moment,
        config: &Config,
        language: Language,
    ) {
        let weekdays = match language {
            Language::Norwegian => WEEKDAYS_NO,
            Language::English => WEEKDAYS_EN,
        };
        let week_label = match language {
            Language::Norwegian => "Uke",
            Language::English => "Wk",
        };
        let header = Row::new(
            std::iter::once(Cell::from(week_label))
                .chain(weekdays.iter().map(|d| Cell::from(*d))),
        )
        .style(Style::default().fg(Color::Cyan));

        let rows = grid.rows.iter().map(|row| {
            let cells = row.days.iter().map(|cell| match cell {
                None => Cell::from(""),
                Some(day) => {
                    let important = !config.important_on(grid.month, *day).is_empty();
                    let text = if important {
                        format!("{day}★")
                    } else {
                        day.to_string()
                    };
                    let mut style = Style::default();
                    if important {
                        style = style.fg(Color::Yellow);
                    }
                    if grid.contains(today) && today.day() == *day {
                        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                    }
                    if calendar.selected_day == *day {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Cell::from(text).style(style)
                }
            });
            Row::new(
                std::iter::once(
                    Cell::from(row.week.to_string()).style(Style::default().fg(Color::DarkGray)),
                )
                .chain(cells),
            )
        });

        let title = format!(" {} {} ", month_name(grid.month, language), grid.year);
        let table = Table::new(rows, [Constraint::Length(4); 8])
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, area);
    }

    fn render_details(
        frame: &mut Frame,
        area: Rect,
        calendar: &CalendarState,
        today: Moment,
        config: &Config,
        language: Language,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(area);

        let selected = calendar.selected_moment(today);
        let distance = day_distance(today, selected);
        let mut lines = vec![
            Line::from(Span::styled(
                formatted_date(selected, language),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(day_distance_phrase(distance, language)),
        ];
        for date in config.important_on(calendar.month, calendar.selected_day) {
            lines.push(Line::from(Span::styled(
                format!("★ {}", date.label),
                Style::default().fg(Color::Yellow),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let title = match language {
            Language::Norwegian => " Viktige datoer ",
            Language::English => " Important dates ",
        };
        let upcoming: Vec<Line> = config
            .important_dates
            .iter()
            .map(|date| {
                let next = next_occurrence(today, date.month.saturating_sub(1), date.day);
                let days = day_distance(today, next);
                Line::from(vec![
                    Span::styled(
                        format!("{:>2}.{:02} ", date.day, date.month),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!("{:<18}", date.label)),
                    Span::styled(
                        day_distance_phrase(days, language),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(upcoming).block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        );
    }
}

/// This year's occurrence of a yearly date, or next year's once it has passed.
pub fn next_occurrence(today: Moment, month: u32, day: u32) -> Moment {
    let this_year = Moment::normalized(today.year() as i64, month as i64, day as i64, 0, 0, 0);
    if day_distance(today, this_year) >= 0 {
        this_year
    } else {
        Moment::normalized(today.year() as i64 + 1, month as i64, day as i64, 0, 0, 0)
    }
}

/// Plain-text month grid; today is bracketed.
pub fn render_month(grid: &MonthGrid, today: Moment, language: Language) -> String {
    let header = match language {
        Language::Norwegian => "Uke  Ma  Ti  On  To  Fr  Lø  Sø",
        Language::English => "Wk   Mo  Tu  We  Th  Fr  Sa  Su",
    };
    let title = format!(
        "{} {}",
        month_name(grid.month, language),
        grid.year
    );

    let mut out = format!("{}\n{}\n", title, header);
    for row in &grid.rows {
        out.push_str(&format!("{:>3} ", row.week));
        for cell in row.days {
            match cell {
                Some(day) if grid.contains(today) && day == today.day() => {
                    out.push_str(&format!("[{:>2}]", day))
                }
                Some(day) => out.push_str(&format!(" {:>2} ", day)),
                None => out.push_str("    "),
            }
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}
