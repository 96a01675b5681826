use insta::assert_snapshot;
use tidstreneren::engine::calendar::MonthGrid;
use tidstreneren::engine::countdown::Remaining;
use tidstreneren::engine::moment::Moment;
use tidstreneren::engine::narration::{
    Language, clock_phrase, day_distance_phrase, ring_phrase, routine_phrase, spoken_time,
    time_announcement,
};
use tidstreneren::engine::ring::RingName;
use tidstreneren::ui::calendar::render_month;

fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Moment {
    Moment::new(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn snapshot_spoken_times() {
    assert_snapshot!(spoken_time(9, 25, Language::Norwegian), @"fem på halv ti på formiddagen");
    assert_snapshot!(spoken_time(13, 0, Language::Norwegian), @"ett på ettermiddagen");
    assert_snapshot!(spoken_time(21, 45, Language::English), @"quarter to ten in the evening");
}

#[test]
fn snapshot_practice_phrases() {
    assert_snapshot!(clock_phrase(3, 45, Language::Norwegian), @"kvart på 4");
    assert_snapshot!(clock_phrase(11, 35, Language::Norwegian), @"25 på 12");
    assert_snapshot!(clock_phrase(12, 30, Language::English), @"half past 12");
}

#[test]
fn snapshot_time_announcement() {
    // 2024-09-02 is a Monday
    let m = moment(2024, 8, 2, 9, 25, 0);
    assert_snapshot!(
        time_announcement(m, Language::Norwegian),
        @"Klokka er fem på halv ti på formiddagen. Det er mandag 2. september."
    );
    assert_snapshot!(
        time_announcement(m, Language::English),
        @"It is twenty-five past nine in the morning, Monday, September 2."
    );
}

#[test]
fn snapshot_ring_and_routine_phrases() {
    let m = moment(2024, 1, 29, 7, 1, 30);
    assert_snapshot!(ring_phrase(m, RingName::Months, Language::Norwegian), @"Februar 2024");
    assert_snapshot!(ring_phrase(m, RingName::Minutes, Language::Norwegian), @"1 minutt");

    let remaining = Remaining::from_millis((2 * 60 + 5) * 60 * 1000);
    assert_snapshot!(
        routine_phrase("Lunsj", 11, 30, &remaining, Language::Norwegian),
        @"Lunsj er klokka 11 og 30. Det er 2t 5m."
    );
    assert_snapshot!(day_distance_phrase(-3, Language::English), @"3 days ago");
}

#[test]
fn snapshot_month_grid() {
    // April 2024 starts on a Monday in ISO week 14
    let today = moment(2024, 3, 10, 12, 0, 0);
    assert_snapshot!(render_month(&MonthGrid::new(2024, 3), today, Language::English), @r"
    April 2024
    Wk   Mo  Tu  We  Th  Fr  Sa  Su
     14   1   2   3   4   5   6   7
     15   8   9 [10] 11  12  13  14
     16  15  16  17  18  19  20  21
     17  22  23  24  25  26  27  28
     18  29  30
    ");
}
