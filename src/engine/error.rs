// Errors raised at the parsing boundary of the engine.
//
// The ring arithmetic itself never fails; these cover user-supplied text
// (ring names, HH:MM targets, --at timestamps) and routine book edits.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("Unknown ring '{0}' (expected months, days, hours, minutes or seconds)")]
    UnknownRing(String),

    #[error("Unknown clock hand '{0}' (expected hour, minute or second)")]
    UnknownHand(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date-time '{0}', expected YYYY-MM-DD HH:MM[:SS]")]
    InvalidMoment(String),

    #[error("Unknown language '{0}' (expected no or en)")]
    UnknownLanguage(String),

    #[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("Routine name cannot be empty")]
    EmptyRoutineName,

    #[error("Routine {0} not found")]
    RoutineNotFound(Uuid),
}
