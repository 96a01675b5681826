// Application state management

use crate::config::Config;
use crate::engine::calendar::step_month;
use crate::engine::countdown::{Remaining, TimeOfDay, time_until};
use crate::engine::hands::{Hand, apply_hand_angle};
use crate::engine::moment::{Moment, TimeUnit};
use crate::engine::narration::Language;
use crate::engine::practice::{ClockTime, Difficulty, PracticeSession, QuestionKind};
use crate::engine::ring::{DragSession, RingName, step_ring};
use crate::engine::routine::RoutineBook;
use crate::engine::speech::Speaker;
use crate::ui::clock::dial::DialGeometry;
use crate::ui::help::HelpModalState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Clock,
    Countdown,
    Routines,
    Practice,
    Calendar,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Clock,
        Screen::Countdown,
        Screen::Routines,
        Screen::Practice,
        Screen::Calendar,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Clock, Language::Norwegian) => "Klokke",
            (Self::Clock, Language::English) => "Clock",
            (Self::Countdown, Language::Norwegian) => "Nedtelling",
            (Self::Countdown, Language::English) => "Countdown",
            (Self::Routines, Language::Norwegian) => "Dagsrytme",
            (Self::Routines, Language::English) => "Routines",
            (Self::Practice, Language::Norwegian) => "Øving",
            (Self::Practice, Language::English) => "Practice",
            (Self::Calendar, Language::Norwegian) => "Kalender",
            (Self::Calendar, Language::English) => "Calendar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,  // Navigation - global shortcuts active
    Editing, // Text entry - characters go to the focused field
}

/// What the pointer is holding on the clock screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Ring(DragSession),
    Hand(Hand),
}

/// The single mutable clock cell: the current Moment and whether it ticks.
#[derive(Debug, Clone)]
pub struct ClockState {
    pub moment: Moment,
    pub running: bool,
    pub capture: Option<Capture>,
    /// Ring the keyboard steppers act on
    pub selected_ring: RingName,
    /// Where the ring dial and analog face were last drawn
    pub dial: Option<DialGeometry>,
    pub face: Option<DialGeometry>,
}

impl ClockState {
    pub fn new(moment: Moment, running: bool) -> Self {
        Self {
            moment,
            running,
            capture: None,
            selected_ring: RingName::Hours,
            dial: None,
            face: None,
        }
    }

    /// Advance one second; a no-op while paused.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.moment = self.moment.add_seconds(1);
        true
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        tracing::debug!(running = self.running, "clock toggled");
    }

    pub fn set_now(&mut self, now: Moment) {
        self.moment = now;
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    /// Grab a ring. Ignored while something else is held.
    pub fn begin_ring_drag(&mut self, ring: RingName) -> bool {
        if self.capture.is_some() {
            return false;
        }
        self.capture = Some(Capture::Ring(DragSession::begin(ring, self.moment)));
        self.selected_ring = ring;
        true
    }

    /// Grab a clock hand. Ignored while something else is held.
    pub fn begin_hand_drag(&mut self, hand: Hand) -> bool {
        if self.capture.is_some() {
            return false;
        }
        self.capture = Some(Capture::Hand(hand));
        true
    }

    pub fn drag_to(&mut self, angle: f64) {
        match &mut self.capture {
            Some(Capture::Ring(session)) => self.moment = session.drag_to(self.moment, angle),
            Some(Capture::Hand(hand)) => self.moment = apply_hand_angle(self.moment, *hand, angle),
            None => {}
        }
    }

    /// Release whatever is held, returning it.
    pub fn end_drag(&mut self) -> Option<Capture> {
        self.capture.take()
    }

    pub fn step(&mut self, ring: RingName, delta: i64) {
        self.moment = step_ring(self.moment, ring, delta);
    }

    pub fn step_year(&mut self, delta: i64) {
        self.moment = self.moment.adjust(TimeUnit::Year, delta);
    }

    /// Move keyboard focus through `rings`, wrapping.
    pub fn select_ring(&mut self, rings: &[RingName], delta: i32) {
        if rings.is_empty() {
            return;
        }
        let current = rings
            .iter()
            .position(|r| *r == self.selected_ring)
            .unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(rings.len() as i32) as usize;
        self.selected_ring = rings[next];
    }
}

/// Which countdown field the arrow keys change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownField {
    Hour,
    Minute,
}

#[derive(Debug, Clone)]
pub struct CountdownState {
    pub target: TimeOfDay,
    pub event_name: String,
    pub active: bool,
    pub field: CountdownField,
    pub remaining: Option<Remaining>,
}

impl CountdownState {
    pub fn new(target: TimeOfDay, event_name: Option<String>) -> Self {
        Self {
            target,
            event_name: event_name.unwrap_or_default(),
            active: false,
            field: CountdownField::Hour,
            remaining: None,
        }
    }

    /// Recompute the remainder while active
    pub fn refresh(&mut self, now: Moment) {
        self.remaining = self.active.then(|| time_until(self.target, now.naive()));
    }

    pub fn step(&mut self, delta: i32) {
        let minutes = match self.field {
            CountdownField::Hour => delta * 60,
            CountdownField::Minute => delta * 5,
        };
        self.target = self.target.step_minutes(minutes);
    }

    pub fn event(&self) -> Option<&str> {
        Some(self.event_name.trim()).filter(|e| !e.is_empty())
    }
}

/// A routine being typed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    pub name: String,
    pub time: TimeOfDay,
}

#[derive(Debug, Clone)]
pub struct RoutinesState {
    pub book: RoutineBook,
    /// Where edits are saved; `None` keeps them in memory
    pub path: Option<PathBuf>,
    pub selected: usize,
    pub draft: Option<RoutineDraft>,
}

impl RoutinesState {
    pub fn new(book: RoutineBook, path: Option<PathBuf>) -> Self {
        Self {
            book,
            path,
            selected: 0,
            draft: None,
        }
    }

    /// Load the book saved at `path`. A file that cannot be read is left
    /// untouched: the defaults are shown and edits stay in memory.
    pub fn load(path: PathBuf) -> Self {
        match RoutineBook::load_or_default(&path) {
            Ok(book) => Self::new(book, Some(path)),
            Err(e) => {
                tracing::warn!("{e:#}; using default routines, changes will not be saved");
                Self::new(RoutineBook::default(), None)
            }
        }
    }

    pub fn save(&self) {
        if let Some(path) = &self.path {
            if let Err(e) = self.book.save(path) {
                tracing::warn!("Failed to save routines: {e:#}");
            }
        }
    }

    pub fn select(&mut self, delta: i32) {
        let len = self.book.routines.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as i32 + delta).rem_euclid(len as i32) as usize;
    }

    /// Id of the highlighted routine, in time order
    pub fn selected_id(&self) -> Option<uuid::Uuid> {
        self.book.sorted().get(self.selected).map(|r| r.id)
    }
}

pub struct PracticeState {
    pub session: PracticeSession,
    /// Highlighted option for read questions
    pub choice: usize,
    /// Clock set by the child for set questions
    pub guess: ClockTime,
    pub face: Option<DialGeometry>,
    pub rng: StdRng,
}

impl PracticeState {
    pub fn new(mut rng: StdRng) -> Self {
        let session = PracticeSession::new(QuestionKind::Read, Difficulty::Easy, &mut rng);
        Self {
            session,
            choice: 0,
            guess: ClockTime::new(12, 0),
            face: None,
            rng,
        }
    }

    pub fn next_question(&mut self) {
        self.session.next_question(&mut self.rng);
        self.choice = 0;
        self.guess = ClockTime::new(12, 0);
    }

    pub fn reconfigure(&mut self, kind: QuestionKind, difficulty: Difficulty) {
        self.session.reconfigure(kind, difficulty, &mut self.rng);
        self.choice = 0;
        self.guess = ClockTime::new(12, 0);
    }

    /// Move the set-the-clock guess by whole hours or minute steps
    pub fn adjust_guess(&mut self, hours: i32, minutes: i32) {
        let total = (self.guess.hours % 12) as i32 * 60 + self.guess.minutes as i32;
        let total = (total + hours * 60 + minutes).rem_euclid(12 * 60);
        let h = (total / 60) as u32;
        self.guess = ClockTime::new(if h == 0 { 12 } else { h }, (total % 60) as u32);
    }

    pub fn submit(&mut self) -> Option<bool> {
        let guess = match self.session.kind {
            QuestionKind::Read => *self.session.current.options.get(self.choice)?,
            QuestionKind::Set => self.guess,
        };
        Some(self.session.answer(guess))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub year: i32,
    /// 0-based
    pub month: u32,
    pub selected_day: u32,
}

impl CalendarState {
    pub fn at(moment: Moment) -> Self {
        Self {
            year: moment.year(),
            month: moment.month(),
            selected_day: moment.day(),
        }
    }

    pub fn step_month(&mut self, delta: i32) {
        let (year, month) = step_month(self.year, self.month, delta);
        self.year = year;
        self.month = month;
        self.clamp_day();
    }

    /// Move the selected day, crossing into neighbouring months
    pub fn step_day(&mut self, delta: i32) {
        let moment = Moment::normalized(
            self.year as i64,
            self.month as i64,
            self.selected_day as i64 + delta as i64,
            0,
            0,
            0,
        );
        *self = Self::at(moment);
    }

    fn clamp_day(&mut self) {
        let days = crate::engine::calendar::days_in_month(self.year, self.month);
        self.selected_day = self.selected_day.clamp(1, days);
    }

    /// The selected date with the time of day taken from `time`
    pub fn selected_moment(&self, time: Moment) -> Moment {
        Moment::normalized(
            self.year as i64,
            self.month as i64,
            self.selected_day as i64,
            time.hour() as i64,
            time.minute() as i64,
            time.second() as i64,
        )
    }
}

pub struct AppState {
    pub current_screen: Screen,
    pub input_mode: InputMode,
    pub language: Language,
    pub config: Config,
    /// Where display changes are saved; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub clock: ClockState,
    pub countdown: CountdownState,
    pub routines: RoutinesState,
    pub practice: PracticeState,
    pub calendar: CalendarState,
    pub help_modal: Option<HelpModalState>,
    pub speaker: Option<Speaker>,
    pub app_version: String,
}

impl AppState {
    pub fn new(moment: Moment, running: bool, language: Language, config: Config) -> Self {
        let countdown = CountdownState::new(
            config.countdown.target(),
            config.countdown.event_name.clone(),
        );
        let speaker = config
            .speech
            .enabled
            .then(|| config.speech.build_speaker());

        Self {
            current_screen: Screen::Clock,
            input_mode: InputMode::Normal,
            language,
            config_path: None,
            clock: ClockState::new(moment, running),
            countdown,
            routines: RoutinesState::new(RoutineBook::default(), None),
            practice: PracticeState::new(StdRng::from_entropy()),
            calendar: CalendarState::at(moment),
            help_modal: None,
            speaker,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            config,
        }
    }

    /// Rings shown on the dial, innermost first
    pub fn visible_rings(&self) -> Vec<RingName> {
        self.config.display.visible_rings()
    }

    /// Fire-and-forget narration; silently skipped when speech is off.
    pub fn speak(&self, text: &str) {
        if let Some(speaker) = &self.speaker {
            speaker.speak(text, self.language);
        }
    }

    pub fn stop_speech(&self) {
        if let Some(speaker) = &self.speaker {
            speaker.stop();
        }
    }

    pub fn persist_config(&self) {
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!("Failed to save config: {e:#}");
            }
        }
    }

    /// Called once per second by the clock tick.
    pub fn on_clock_tick(&mut self) {
        self.clock.tick();
        self.countdown.refresh(Moment::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Moment {
        Moment::new(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let start = moment(2024, 11, 31, 23, 59, 59);
        let mut clock = ClockState::new(start, false);
        assert!(!clock.tick());
        assert_eq!(clock.moment, start);

        clock.toggle_running();
        assert!(clock.tick());
        assert_eq!(clock.moment, moment(2025, 0, 1, 0, 0, 0));
    }

    #[test]
    fn test_second_capture_is_ignored_until_release() {
        let mut clock = ClockState::new(moment(2024, 5, 1, 8, 0, 0), false);
        assert!(clock.begin_ring_drag(RingName::Minutes));
        assert!(!clock.begin_ring_drag(RingName::Hours));
        assert!(!clock.begin_hand_drag(Hand::Minute));

        clock.drag_to(90.0);
        assert_eq!(clock.moment.minute(), 15);

        assert!(matches!(clock.end_drag(), Some(Capture::Ring(_))));
        assert!(clock.begin_hand_drag(Hand::Hour));
        clock.drag_to(90.0);
        assert_eq!(clock.moment.hour(), 3);
        assert_eq!(clock.end_drag(), Some(Capture::Hand(Hand::Hour)));
        assert_eq!(clock.end_drag(), None);
    }

    #[test]
    fn test_month_drag_through_state_rolls_year() {
        let mut clock = ClockState::new(moment(2024, 11, 15, 12, 0, 0), false);
        clock.begin_ring_drag(RingName::Months);
        clock.drag_to(5.0);
        assert_eq!((clock.moment.year(), clock.moment.month()), (2025, 0));
        clock.drag_to(355.0);
        assert_eq!((clock.moment.year(), clock.moment.month()), (2024, 11));
    }

    #[test]
    fn test_drag_without_capture_does_nothing() {
        let start = moment(2024, 5, 1, 8, 0, 0);
        let mut clock = ClockState::new(start, false);
        clock.drag_to(180.0);
        assert_eq!(clock.moment, start);
    }

    #[test]
    fn test_select_ring_wraps() {
        let mut clock = ClockState::new(moment(2024, 5, 1, 8, 0, 0), false);
        let rings = [RingName::Hours, RingName::Minutes];
        clock.select_ring(&rings, 1);
        assert_eq!(clock.selected_ring, RingName::Minutes);
        clock.select_ring(&rings, 1);
        assert_eq!(clock.selected_ring, RingName::Hours);
        clock.select_ring(&rings, -1);
        assert_eq!(clock.selected_ring, RingName::Minutes);
    }

    #[test]
    fn test_countdown_steps_wrap() {
        let mut countdown = CountdownState::new(TimeOfDay::new(23, 0).unwrap(), None);
        countdown.step(1);
        assert_eq!(countdown.target.to_string(), "00:00");
        countdown.field = CountdownField::Minute;
        countdown.step(-1);
        assert_eq!(countdown.target.to_string(), "23:55");
        assert_eq!(countdown.event(), None);
    }

    #[test]
    fn test_calendar_navigation() {
        let mut cal = CalendarState::at(moment(2024, 0, 31, 10, 0, 0));
        cal.step_month(1);
        assert_eq!((cal.year, cal.month, cal.selected_day), (2024, 1, 29));
        cal.step_day(1);
        assert_eq!((cal.year, cal.month, cal.selected_day), (2024, 2, 1));
        cal.step_month(-3);
        assert_eq!((cal.year, cal.month), (2023, 11));

        let jumped = cal.selected_moment(moment(2024, 5, 1, 8, 30, 15));
        assert_eq!(jumped, moment(2023, 11, 1, 8, 30, 15));
    }

    #[test]
    fn test_practice_guess_wraps_on_twelve_hour_face() {
        let mut practice = PracticeState::new(StdRng::seed_from_u64(1));
        practice.adjust_guess(0, -5);
        assert_eq!(practice.guess, ClockTime::new(11, 55));
        practice.adjust_guess(1, 5);
        assert_eq!(practice.guess, ClockTime::new(1, 0));
    }

    #[test]
    fn test_screen_cycle() {
        assert_eq!(Screen::Calendar.next(), Screen::Clock);
        assert_eq!(Screen::Clock.previous(), Screen::Calendar);
        assert_eq!(Screen::Routines.title(Language::English), "Routines");
    }
}
