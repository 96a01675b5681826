use crate::engine::narration::Language;

#[derive(Debug, Clone)]
pub struct HelpModalState {
    pub current_section: HelpSection,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    pub app_version: String,
    pub language: Language,
    /// Speech providers configured, in the order they are tried
    pub speech_providers: Vec<String>,
    pub speech_enabled: bool,
}

impl HelpModalState {
    pub fn new(
        app_version: String,
        language: Language,
        speech_providers: Vec<String>,
        speech_enabled: bool,
    ) -> Self {
        Self {
            current_section: HelpSection::About,
            scroll_offset: 0,
            max_scroll: 0,
            app_version,
            language,
            speech_providers,
            speech_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSection {
    About,
    RingClock,
    Countdown,
    Routines,
    Practice,
    Calendar,
    KeyboardShortcuts,
}

impl HelpSection {
    pub fn next(self) -> Self {
        match self {
            Self::About => Self::RingClock,
            Self::RingClock => Self::Countdown,
            Self::Countdown => Self::Routines,
            Self::Routines => Self::Practice,
            Self::Practice => Self::Calendar,
            Self::Calendar => Self::KeyboardShortcuts,
            Self::KeyboardShortcuts => Self::About,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::About => Self::KeyboardShortcuts,
            Self::RingClock => Self::About,
            Self::Countdown => Self::RingClock,
            Self::Routines => Self::Countdown,
            Self::Practice => Self::Routines,
            Self::Calendar => Self::Practice,
            Self::KeyboardShortcuts => Self::Calendar,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::About => "About",
            Self::RingClock => "Ring Clock",
            Self::Countdown => "Countdown",
            Self::Routines => "Routines",
            Self::Practice => "Practice",
            Self::Calendar => "Calendar",
            Self::KeyboardShortcuts => "Keyboard Shortcuts",
        }
    }

    pub fn all_sections() -> Vec<Self> {
        vec![
            Self::About,
            Self::RingClock,
            Self::Countdown,
            Self::Routines,
            Self::Practice,
            Self::Calendar,
            Self::KeyboardShortcuts,
        ]
    }
}
