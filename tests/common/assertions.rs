#![allow(dead_code)]

use tidstreneren::engine::moment::Moment;

/// Compare every field of a Moment, month 0-based.
pub fn assert_moment(actual: Moment, expected: (i32, u32, u32, u32, u32, u32)) {
    let got = (
        actual.year(),
        actual.month(),
        actual.day(),
        actual.hour(),
        actual.minute(),
        actual.second(),
    );
    assert_eq!(
        got, expected,
        "moment mismatch: got {actual}, expected (year, month0, day, h, m, s) = {expected:?}"
    );
}
