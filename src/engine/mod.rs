// Time-ring model - independent of UI

pub mod calendar;
pub mod countdown;
pub mod error;
pub mod hands;
pub mod moment;
pub mod narration;
pub mod practice;
pub mod ring;
pub mod routine;
pub mod speech;

pub use calendar::{MonthGrid, days_in_month, is_leap_year};
pub use countdown::{Remaining, TimeOfDay, Urgency, time_until};
pub use error::ClockError;
pub use hands::{Hand, HandAngles, apply_hand_angle};
pub use moment::{Moment, TimeUnit};
pub use narration::Language;
pub use ring::{
    DragSession, RingName, RingReading, RingSpec, apply_ring_value, pointer_angle, read_ring,
    ring_layout, step_ring, value_for_angle,
};
pub use routine::{Routine, RoutineBook};
pub use speech::{ProviderChain, Speaker, SpeechError};
