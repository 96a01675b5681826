use crate::cli::{Cli, Commands, RoutineAction};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process;
use tidstreneren::engine::calendar::{self, MonthGrid};
use tidstreneren::engine::countdown::{self, TimeOfDay, Urgency};
use tidstreneren::engine::hands::{self, Hand, HandAngles};
use tidstreneren::engine::moment::Moment;
use tidstreneren::engine::narration::{self, Language};
use tidstreneren::engine::practice::{ClockTime, Difficulty, PracticeSession, QuestionKind};
use tidstreneren::engine::ring::{self, DragSession, RingName, RingSpec};
use tidstreneren::engine::routine::RoutineBook;
use tidstreneren::{config, ui};
use uuid::Uuid;

pub fn run(cli: Cli) {
    let (config, config_path) = config::Config::load_session();
    let language = cli.lang.unwrap_or(config.startup.language);
    let pinned = cli.at.is_some();
    let moment = cli.at.unwrap_or_else(Moment::now);

    if let Some(command) = cli.command {
        match command {
            Commands::Show { json } => handle_show(moment, language, json),
            Commands::Drag { ring, angles } => handle_drag(moment, ring, &angles, language),
            Commands::Hand { hand, angle } => handle_hand(moment, hand, angle, language),
            Commands::Say { text } => handle_say(&config, moment, text, language),
            Commands::Countdown {
                target,
                event,
                speak,
            } => handle_countdown(&config, moment, target, event, speak, language),
            Commands::Calendar { month, year } => {
                handle_calendar(&config, moment, month, year, language)
            }
            Commands::Routines { action } => {
                handle_routines(action.unwrap_or(RoutineAction::List), moment, language)
            }
            Commands::Practice {
                difficulty,
                questions,
                seed,
                set,
            } => handle_practice(difficulty, questions, seed, set, language),
            Commands::InitConfig => handle_init_config(),
        }
        return;
    }

    // A pinned moment starts paused unless the config says otherwise
    let running = !cli.paused && config.startup.running && !pinned;

    // Launch TUI (default behavior)
    if let Err(e) = ui::run_ui(moment, running, language, config, config_path) {
        eprintln!("Error running UI: {:#}", e);
        process::exit(1);
    }
}

#[derive(Serialize)]
struct ShowReport {
    moment: Moment,
    rings: Vec<RingSpec>,
    hands: HandAngles,
    leap_year: bool,
    days_in_month: u32,
    day_of_year: u32,
    iso_week: u32,
    digital: String,
    spoken_time: String,
    spoken_date: String,
}

impl ShowReport {
    fn new(moment: Moment, language: Language) -> Self {
        Self {
            moment,
            rings: ring::ring_layout(moment, &RingName::ALL),
            hands: HandAngles::of(moment),
            leap_year: calendar::is_leap_year(moment.year()),
            days_in_month: calendar::days_in_month(moment.year(), moment.month()),
            day_of_year: calendar::day_of_year(moment),
            iso_week: calendar::iso_week(moment),
            digital: format!("{:02}:{:02}:{:02}", moment.hour(), moment.minute(), moment.second()),
            spoken_time: narration::spoken_time(moment.hour(), moment.minute(), language),
            spoken_date: narration::spoken_date(moment, language),
        }
    }
}

fn handle_show(moment: Moment, language: Language, json: bool) {
    let report = ShowReport::new(moment, language);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{}  ({})", report.digital, narration::formatted_date(moment, language));
    println!("{}", report.spoken_time);
    println!("{}", report.spoken_date);
    println!();
    for spec in &report.rings {
        println!(
            "  {:<8} {:>2} / {:<2}  r={}",
            spec.name, spec.value, spec.count, spec.radius
        );
    }
    println!();
    println!(
        "  hands    hour {:.1}°  minute {:.1}°  second {:.1}°",
        report.hands.hour, report.hands.minute, report.hands.second
    );
    println!(
        "  year     {} ({} days{}), day {} of the year, week {}",
        moment.year(),
        calendar::days_in_year(moment.year()),
        if report.leap_year { ", leap year" } else { "" },
        report.day_of_year,
        report.iso_week
    );
}

fn handle_drag(moment: Moment, ring: RingName, angles: &[f64], language: Language) {
    let mut session = DragSession::begin(ring, moment);
    let mut current = moment;
    println!("start      {}", current);

    for &angle in angles {
        current = session.drag_to(current, angle);
        let reading = ring::read_ring(current, ring);
        println!(
            "{:>7.1}°  {}  ({} {}/{})",
            angle, current, ring, reading.value, reading.count
        );
    }
    println!("{}", narration::ring_phrase(current, ring, language));
}

fn handle_hand(moment: Moment, hand: Hand, angle: f64, language: Language) {
    let updated = hands::apply_hand_angle(moment, hand, angle);
    println!("{} -> {}", moment, updated);
    println!("{}", narration::spoken_time(updated.hour(), updated.minute(), language));
}

fn handle_say(config: &config::Config, moment: Moment, text: Option<String>, language: Language) {
    let text = text.unwrap_or_else(|| narration::time_announcement(moment, language));
    println!("{}", text);
    speak_blocking(config, &text, language);
}

fn speak_blocking(config: &config::Config, text: &str, language: Language) {
    if !config.speech.enabled {
        eprintln!("Speech is disabled in config");
        return;
    }

    let speaker = config.speech.build_speaker();
    match speaker.speak_and_wait(text, language) {
        Ok(provider) => tracing::info!(%provider, "spoke"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn handle_countdown(
    config: &config::Config,
    moment: Moment,
    target: Option<TimeOfDay>,
    event: Option<String>,
    speak: bool,
    language: Language,
) {
    let target = target.unwrap_or_else(|| config.countdown.target());
    let event = event.or_else(|| config.countdown.event_name.clone());
    let remaining = countdown::time_until(target, moment.naive());

    println!(
        "{}  {:02}:{:02}:{:02}  ({:?})",
        target,
        remaining.hours,
        remaining.minutes,
        remaining.seconds,
        Urgency::of(&remaining)
    );
    let phrase = narration::countdown_phrase(&remaining, event.as_deref(), language);
    println!("{}", phrase);

    if speak {
        speak_blocking(config, &phrase, language);
    }
}

fn handle_calendar(
    config: &config::Config,
    moment: Moment,
    month: Option<u32>,
    year: Option<i32>,
    language: Language,
) {
    let month0 = month.map(|m| m - 1).unwrap_or(moment.month());
    let year = year.unwrap_or(moment.year());
    let grid = MonthGrid::new(year, month0);

    print!("{}", ui::calendar::render_month(&grid, moment, language));

    let marked: Vec<_> = config
        .important_dates
        .iter()
        .filter(|d| d.month == month0 + 1 && d.day <= grid.days)
        .collect();
    if !marked.is_empty() {
        println!();
        for date in marked {
            let days = Moment::new(year, month0, date.day, 0, 0, 0)
                .map(|m| calendar::day_distance(moment, m));
            match days {
                Some(days) => println!(
                    "  {:>2}. {}  ({})",
                    date.day,
                    date.label,
                    narration::day_distance_phrase(days, language)
                ),
                None => println!("  {:>2}. {}", date.day, date.label),
            }
        }
    }
}

fn handle_routines(action: RoutineAction, moment: Moment, language: Language) {
    let path = match config::Config::routines_path() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };
    let mut book = match RoutineBook::load_or_default(&path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let changed = match action {
        RoutineAction::List => {
            print_routines(&book, moment, language);
            false
        }
        RoutineAction::Add { name, time, icon } => match book.add(&name, time, icon.as_deref()) {
            Ok(id) => {
                println!("Added {} at {} ({})", name.trim(), time, id);
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        RoutineAction::Remove { id } => remove_routine(&mut book, id),
        RoutineAction::Reset => {
            book.reset();
            println!("Routines reset to defaults");
            true
        }
    };

    if changed {
        if let Err(e) = book.save(&path) {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn remove_routine(book: &mut RoutineBook, id: Uuid) -> bool {
    match book.remove(id) {
        Ok(routine) => {
            println!("Removed {}", routine.name);
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_routines(book: &RoutineBook, moment: Moment, language: Language) {
    let now = moment.naive();
    let current = book.current(now).map(|r| r.id);
    let upcoming: Vec<Uuid> = book.upcoming(now).iter().map(|r| r.id).collect();

    for routine in book.sorted() {
        let marker = if Some(routine.id) == current {
            '>'
        } else if upcoming.contains(&routine.id) {
            '*'
        } else {
            ' '
        };
        let remaining = routine.time_until(now);
        println!(
            "{} {} {} {:<16} {:<10} {}",
            marker,
            routine.time(),
            routine.icon,
            routine.name,
            narration::until_label(&remaining, language),
            routine.id
        );
    }
}

fn handle_practice(difficulty: Difficulty, questions: u32, seed: Option<u64>, set: bool, language: Language) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let kind = if set { QuestionKind::Set } else { QuestionKind::Read };
    let mut session = PracticeSession::new(kind, difficulty, &mut rng);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for n in 1..=questions {
        let question = session.current.clone();
        let target = question.target;

        let guess = match kind {
            QuestionKind::Read => {
                println!("\n{}. {}", n, narration::digital(target.hours, target.minutes));
                for (idx, option) in question.options.iter().enumerate() {
                    println!(
                        "   {}) {}",
                        idx + 1,
                        narration::clock_phrase(option.hours, option.minutes, language)
                    );
                }
                prompt("> ");
                lines
                    .next()
                    .and_then(|l| l.ok())
                    .and_then(|l| l.trim().parse::<usize>().ok())
                    .and_then(|i| i.checked_sub(1))
                    .and_then(|i| question.options.get(i).copied())
            }
            QuestionKind::Set => {
                println!(
                    "\n{}. {}",
                    n,
                    narration::clock_phrase(target.hours, target.minutes, language)
                );
                prompt("H:MM> ");
                lines
                    .next()
                    .and_then(|l| l.ok())
                    .and_then(|l| parse_clock_time(&l))
            }
        };

        let Some(guess) = guess else {
            println!("?");
            break;
        };
        if session.answer(guess) {
            println!("Riktig! / Correct!");
        } else {
            println!(
                "{} ({})",
                narration::clock_phrase(target.hours, target.minutes, language),
                narration::digital(target.hours, target.minutes)
            );
        }
        session.next_question(&mut rng);
    }

    println!("\n{}/{} ({}%)", session.score, session.total, session.percent());
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

/// "3:15" or "15:15" on a 12-hour face
fn parse_clock_time(input: &str) -> Option<ClockTime> {
    let time: TimeOfDay = input.parse().ok()?;
    let hours = match time.hour % 12 {
        0 => 12,
        h => h,
    };
    Some(ClockTime::new(hours, time.minute))
}

fn handle_init_config() {
    match config::Config::load() {
        Ok(cfg) => {
            match config::Config::config_path() {
                Ok(path) => println!("Config loaded successfully from {}", path.display()),
                Err(e) => println!("Config loaded, but config path unknown: {:#}", e),
            }
            println!("{:#?}", cfg);
        }
        Err(e) => {
            println!("Config missing or invalid: {:#}", e);
            println!("Creating default config...");

            let cfg = config::Config::default();
            if let Err(err) = cfg.save() {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            } else {
                match config::Config::config_path() {
                    Ok(path) => println!("Default config saved to {}", path.display()),
                    Err(e) => println!("Default config saved (path unknown): {:#}", e),
                }
            }
        }
    }
}
