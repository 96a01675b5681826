// Terminal UI using Ratatui

pub mod calendar;
pub mod clock;
pub mod constants;
pub mod countdown;
pub mod events;
pub mod help;
pub mod practice;
pub mod routines;
pub mod state;
pub mod widgets;

pub use calendar::CalendarScreen;
pub use clock::ClockScreen;
pub use countdown::CountdownScreen;
pub use events::run_ui;
pub use help::{HelpModal, HelpModalState, HelpSection};
pub use practice::PracticeScreen;
pub use routines::RoutinesScreen;
pub use state::AppState;
