// Practice quiz: read-the-clock and set-the-clock questions

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::ClockError;

const QUARTERS: [u32; 4] = [0, 15, 30, 45];

/// Number of wrong options shown next to the right one
pub const DISTRACTORS: usize = 3;

// Distractor generation gives up after this many rejected candidates.
const MAX_DISTRACTOR_ATTEMPTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Whole and half hours
    #[default]
    Easy,
    /// Quarter hours
    Medium,
    /// Any five-minute step
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "lett" => Ok(Self::Easy),
            "medium" | "middels" => Ok(Self::Medium),
            "hard" | "vanskelig" => Ok(Self::Hard),
            _ => Err(ClockError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Show a clock, pick the matching phrase
    #[default]
    Read,
    /// Show a phrase, set the clock to it
    Set,
}

/// A time on a 12-hour face: hours 1..=12, minutes 0..60
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }
}

pub fn random_time<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> ClockTime {
    let hours = rng.gen_range(1..=12);
    let minutes = match difficulty {
        Difficulty::Easy => {
            if rng.gen_bool(0.5) {
                0
            } else {
                30
            }
        }
        Difficulty::Medium => QUARTERS[rng.gen_range(0..QUARTERS.len())],
        Difficulty::Hard => rng.gen_range(0..12) * 5,
    };
    ClockTime { hours, minutes }
}

/// Distinct wrong answers one or two hours away from `correct`, sometimes
/// with a different quarter. Hours stay within 1..=12.
pub fn wrong_answers<R: Rng + ?Sized>(correct: ClockTime, count: usize, rng: &mut R) -> Vec<ClockTime> {
    let mut used = HashSet::from([correct]);
    let mut answers = Vec::with_capacity(count);

    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        if answers.len() == count {
            break;
        }
        let shift = rng.gen_range(1..=2) as i32 * if rng.gen_bool(0.5) { 1 } else { -1 };
        let mut hours = correct.hours as i32 + shift;
        if hours < 1 {
            hours += 12;
        }
        if hours > 12 {
            hours -= 12;
        }
        let minutes = if rng.gen_bool(0.5) {
            QUARTERS[rng.gen_range(0..QUARTERS.len())]
        } else {
            correct.minutes
        };

        let candidate = ClockTime::new(hours as u32, minutes);
        if used.insert(candidate) {
            answers.push(candidate);
        }
    }

    answers
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub target: ClockTime,
    /// Shuffled options including `target`; empty for set-the-clock
    pub options: Vec<ClockTime>,
}

impl Question {
    pub fn generate<R: Rng + ?Sized>(kind: QuestionKind, difficulty: Difficulty, rng: &mut R) -> Self {
        let target = random_time(difficulty, rng);
        let options = match kind {
            QuestionKind::Read => {
                let mut options = wrong_answers(target, DISTRACTORS, rng);
                options.push(target);
                options.shuffle(rng);
                options
            }
            QuestionKind::Set => Vec::new(),
        };
        Self {
            kind,
            target,
            options,
        }
    }

    pub fn is_correct(&self, answer: ClockTime) -> bool {
        answer == self.target
    }
}

/// Score keeping across questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
    pub current: Question,
    pub score: u32,
    pub total: u32,
    /// Result of the current question, once answered
    pub answered: Option<bool>,
}

impl PracticeSession {
    pub fn new<R: Rng + ?Sized>(kind: QuestionKind, difficulty: Difficulty, rng: &mut R) -> Self {
        Self {
            kind,
            difficulty,
            current: Question::generate(kind, difficulty, rng),
            score: 0,
            total: 0,
            answered: None,
        }
    }

    /// Record an answer; a question only counts once.
    pub fn answer(&mut self, guess: ClockTime) -> bool {
        if let Some(result) = self.answered {
            return result;
        }
        let correct = self.current.is_correct(guess);
        self.total += 1;
        if correct {
            self.score += 1;
        }
        self.answered = Some(correct);
        tracing::debug!(correct, score = self.score, total = self.total, "practice answer");
        correct
    }

    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = Question::generate(self.kind, self.difficulty, rng);
        self.answered = None;
    }

    /// Switch question kind or difficulty; starts a fresh question but keeps
    /// the score.
    pub fn reconfigure<R: Rng + ?Sized>(&mut self, kind: QuestionKind, difficulty: Difficulty, rng: &mut R) {
        self.kind = kind;
        self.difficulty = difficulty;
        self.next_question(rng);
    }

    /// Rounded percentage of correct answers
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.score as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_time_respects_difficulty() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let t = random_time(Difficulty::Easy, &mut rng);
            assert!((1..=12).contains(&t.hours));
            assert!(t.minutes == 0 || t.minutes == 30);

            let t = random_time(Difficulty::Medium, &mut rng);
            assert!(QUARTERS.contains(&t.minutes));

            let t = random_time(Difficulty::Hard, &mut rng);
            assert_eq!(t.minutes % 5, 0);
            assert!(t.minutes < 60);
        }
    }

    #[test]
    fn test_wrong_answers_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for hours in 1..=12 {
            let correct = ClockTime::new(hours, 30);
            let wrong = wrong_answers(correct, DISTRACTORS, &mut rng);
            assert_eq!(wrong.len(), DISTRACTORS);
            assert!(!wrong.contains(&correct));
            let unique: HashSet<_> = wrong.iter().collect();
            assert_eq!(unique.len(), wrong.len());
            assert!(wrong.iter().all(|t| (1..=12).contains(&t.hours)));
        }
    }

    #[test]
    fn test_read_question_contains_target_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = Question::generate(QuestionKind::Read, Difficulty::Hard, &mut rng);
        assert_eq!(q.options.len(), DISTRACTORS + 1);
        assert_eq!(q.options.iter().filter(|o| **o == q.target).count(), 1);

        let q = Question::generate(QuestionKind::Set, Difficulty::Hard, &mut rng);
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_session_scores_each_question_once() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = PracticeSession::new(QuestionKind::Read, Difficulty::Easy, &mut rng);
        let target = session.current.target;
        assert!(session.answer(target));
        assert!(session.answer(ClockTime::new(0, 0)));
        assert_eq!((session.score, session.total), (1, 1));

        session.next_question(&mut rng);
        assert_eq!(session.answered, None);
        assert!(!session.answer(ClockTime::new(0, 0)));
        assert_eq!((session.score, session.total), (1, 2));
        assert_eq!(session.percent(), 50);
    }

    #[test]
    fn test_difficulty_parse_and_cycle() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }
}
