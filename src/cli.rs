use clap::{Parser, Subcommand};
use tidstreneren::engine::countdown::TimeOfDay;
use tidstreneren::engine::hands::Hand;
use tidstreneren::engine::moment::Moment;
use tidstreneren::engine::narration::Language;
use tidstreneren::engine::practice::Difficulty;
use tidstreneren::engine::ring::RingName;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tidstreneren")]
#[command(about = "Time trainer: ring clock, countdowns and routines in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Pin the clock to a moment instead of the wall clock ("YYYY-MM-DD HH:MM:SS")
    #[arg(long, global = true, value_name = "MOMENT")]
    pub at: Option<Moment>,

    /// Start with the clock stopped (overrides config)
    #[arg(long)]
    pub paused: bool,

    /// Narration language, "no" or "en" (overrides config)
    #[arg(long, global = true)]
    pub lang: Option<Language>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print ring readings, hand angles and narration for a moment
    Show {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Drag a ring through a sequence of pointer angles (degrees from 12 o'clock)
    Drag {
        /// months, days, hours, minutes or seconds
        ring: RingName,

        /// Angles visited during the drag, in order
        #[arg(required = true, allow_negative_numbers = true)]
        angles: Vec<f64>,
    },

    /// Set the time by pointing an analog clock hand at an angle
    Hand {
        /// hour, minute or second
        hand: Hand,

        #[arg(allow_negative_numbers = true)]
        angle: f64,
    },

    /// Speak the time, or the given text
    Say {
        text: Option<String>,
    },

    /// Time left until a time of day
    Countdown {
        /// Target as HH:MM (defaults to the configured countdown)
        target: Option<TimeOfDay>,

        /// Event name used in the narration
        #[arg(long)]
        event: Option<String>,

        /// Also speak the result
        #[arg(long)]
        speak: bool,
    },

    /// Print a month calendar with ISO week numbers
    Calendar {
        /// Month 1-12 (defaults to the current month)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(allow_negative_numbers = true)]
        year: Option<i32>,
    },

    /// Manage daily routines
    Routines {
        #[command(subcommand)]
        action: Option<RoutineAction>,
    },

    /// Answer clock-reading questions in the terminal
    Practice {
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,

        /// Number of questions
        #[arg(long, default_value_t = 5)]
        questions: u32,

        /// Seed for reproducible question sets
        #[arg(long)]
        seed: Option<u64>,

        /// Ask for the time as HH:MM instead of offering choices
        #[arg(long)]
        set: bool,
    },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// List routines in order, marking the current and upcoming ones
    List,

    /// Add a routine
    Add {
        name: String,

        /// Start time as HH:MM
        time: TimeOfDay,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Remove a routine by id
    Remove {
        id: Uuid,
    },

    /// Restore the default routines
    Reset,
}

pub fn parse() -> Cli {
    Cli::parse()
}
