// Event handling and main UI loop

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::engine::moment::Moment;
use crate::engine::narration::{Language, time_announcement};
use crate::ui::{
    CalendarScreen, ClockScreen, CountdownScreen, HelpModal, PracticeScreen, RoutinesScreen,
    constants::{CLOCK_TICK_MS, RENDER_TICK_MS},
    state::{AppState, InputMode, RoutinesState, Screen},
};

mod calendar;
mod clock;
mod countdown;
mod help;
mod practice;
mod routines;

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard, mouse, or other terminal events
    Render,       // Redraw tick (~30 FPS)
    ClockTick,    // One second of wall time
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let render_rate = Duration::from_millis(RENDER_TICK_MS);
    let clock_rate = Duration::from_millis(CLOCK_TICK_MS);

    thread::spawn(move || {
        let mut last_render = Instant::now();
        let mut last_clock = Instant::now();
        loop {
            let timeout = render_rate
                .checked_sub(last_render.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_render.elapsed() >= render_rate {
                if tx.send(UiEvent::Render).is_err() {
                    break;
                }
                last_render = Instant::now();
            }

            if last_clock.elapsed() >= clock_rate {
                if tx.send(UiEvent::ClockTick).is_err() {
                    break;
                }
                // Keep cadence instead of drifting by the poll latency
                last_clock += clock_rate;
            }
        }
    });
}

pub fn run_ui(
    moment: Moment,
    running: bool,
    language: Language,
    config: Config,
    config_path: Option<PathBuf>,
) -> io::Result<()> {
    let mut app_state = AppState::new(moment, running, language, config);
    let routines_path = Config::routines_path()
        .map_err(|e| tracing::warn!("Routines will not be saved: {e:#}"))
        .ok();
    attach_storage(&mut app_state, config_path, routines_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    tracing::info!(%moment, running, %language, "starting clock UI");
    let result = run_app(&mut terminal, &mut app_state, event_rx);
    app_state.stop_speech();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Point the state at the on-disk config and routines so edits persist.
/// A `None` path keeps that part in memory only.
fn attach_storage(
    state: &mut AppState,
    config_path: Option<PathBuf>,
    routines_path: Option<PathBuf>,
) {
    if config_path.is_none() {
        tracing::warn!("Settings changes will not be saved this session");
    }
    state.config_path = config_path;
    if let Some(path) = routines_path {
        state.routines = RoutinesState::load(path);
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    loop {
        // Collect all pending events so tick bursts coalesce and inputs stay snappy
        let mut pending_clock_ticks: u64 = 0;
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Always block for at least one event, then drain the queue
        match event_rx.recv() {
            Ok(evt) => match evt {
                UiEvent::ClockTick => pending_clock_ticks += 1,
                UiEvent::Input(ev) => pending_inputs.push(ev),
                UiEvent::Render => {}
            },
            Err(_) => return Ok(()),
        }

        while let Ok(evt) = event_rx.try_recv() {
            match evt {
                UiEvent::ClockTick => pending_clock_ticks += 1,
                UiEvent::Input(ev) => pending_inputs.push(ev),
                UiEvent::Render => {}
            }
        }

        // Input first so a drag is never stuck behind a tick backlog
        for input in pending_inputs {
            match input {
                Event::Key(key) => {
                    if handle_key(key, state) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(mouse, state),
                _ => {}
            }
        }

        // Every missed second still advances the clock
        for _ in 0..pending_clock_ticks {
            state.on_clock_tick();
        }

        terminal.draw(|frame| draw(frame, state))?;
    }
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Screen tabs
            Constraint::Min(10),   // Screen
            Constraint::Length(1), // Hints
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], state);

    let language = state.language;
    match state.current_screen {
        Screen::Clock => ClockScreen::render(
            frame,
            chunks[1],
            &mut state.clock,
            &state.config.display,
            language,
        ),
        Screen::Countdown => CountdownScreen::render(
            frame,
            chunks[1],
            &state.countdown,
            state.input_mode,
            language,
        ),
        Screen::Routines => RoutinesScreen::render(
            frame,
            chunks[1],
            &state.routines,
            Moment::now(),
            language,
        ),
        Screen::Practice => PracticeScreen::render(frame, chunks[1], &mut state.practice, language),
        Screen::Calendar => CalendarScreen::render(
            frame,
            chunks[1],
            &state.calendar,
            state.clock.moment,
            &state.config,
            language,
        ),
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Screen  "),
        Span::styled("[L]", Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {}  ", language.toggled())),
        Span::styled("[V]", Style::default().fg(Color::Yellow)),
        Span::raw(" Speak  "),
        Span::styled("[H]", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::Gray)),
        chunks[2],
    );

    if let Some(ref mut help_state) = state.help_modal {
        HelpModal::render(frame, help_state);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<String> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(idx, screen)| format!("{} {}", idx + 1, screen.title(state.language)))
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == state.current_screen)
        .unwrap_or(0);
    let tabs = Tabs::new(titles).select(selected).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(tabs, area);
}

fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Returns true when the app should exit.
fn handle_key(key: KeyEvent, state: &mut AppState) -> bool {
    if state.help_modal.is_some() {
        help::handle_help_key(key, state);
        return false;
    }

    // Text entry swallows the global shortcuts
    if state.input_mode == InputMode::Normal {
        if should_quit(&key) {
            return true;
        }
        if handle_global_key(key, state) {
            return false;
        }
    }

    match state.current_screen {
        Screen::Clock => clock::handle_clock_key(key, state),
        Screen::Countdown => countdown::handle_countdown_key(key, state),
        Screen::Routines => routines::handle_routines_key(key, state),
        Screen::Practice => practice::handle_practice_key(key, state),
        Screen::Calendar => calendar::handle_calendar_key(key, state),
    }

    false
}

/// Keys that work on every screen. Returns true when consumed.
fn handle_global_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('h') | KeyCode::Char('H') => help::open_help(state),
        KeyCode::Tab => state.current_screen = state.current_screen.next(),
        KeyCode::BackTab => state.current_screen = state.current_screen.previous(),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            state.current_screen = Screen::ALL[idx];
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            state.language = state.language.toggled();
            state.config.startup.language = state.language;
            state.persist_config();
        }
        KeyCode::Char('v') | KeyCode::Char('V') => {
            state.speak(&time_announcement(state.clock.moment, state.language));
        }
        _ => return false,
    }
    true
}

fn handle_mouse(mouse: MouseEvent, state: &mut AppState) {
    if state.help_modal.is_some() {
        return;
    }
    match state.current_screen {
        Screen::Clock => clock::handle_clock_mouse(mouse, state),
        Screen::Practice => practice::handle_practice_mouse(mouse, state),
        _ => {}
    }
}
