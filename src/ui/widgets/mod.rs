// Custom widgets for the TUI

pub mod progress;
pub mod slider;

pub use progress::{UrgencyBar, urgency_color};
pub use slider::Stepper;
