//! Conversion between calendar dates and a running day count.
//!
//! The count is `year * 365` plus the leap days of every prior year plus the day of the year.
//! Its origin carries no meaning of its own, it only has to be the same everywhere so that
//! differences are exact day counts and `(epoch - 1) mod 7` lands on Sunday as 0.

use crate::consts::{
    DAYS_BEFORE_MONTH, DAYS_IN_GREGORIAN_CYCLE, DAYS_IN_MONTH, DAYS_IN_WEEK, DAYS_IN_YEAR,
    DECEMBER, FRIDAY, GREGORIAN_CYCLE, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, MONDAY,
};
use crate::types::{days_in_month, is_leap_year};

/// Day count used for all arithmetic.
///
/// Every value whose year fits in `i32` maps to exactly one proleptic date. Only
/// [`FIRST_EPOCH`]`..=`[`LAST_EPOCH`] maps to a supported one.
pub type Epoch = i64;

/// Epoch of 1583-01-01
pub const FIRST_EPOCH: Epoch = epoch_from_parts(MIN_YEAR, JANUARY, MIN_DAY);

/// Epoch of 9999-12-31
pub const LAST_EPOCH: Epoch = epoch_from_parts(MAX_YEAR, DECEMBER, DAYS_IN_MONTH[12]);

/// Checks a date lies in the supported Gregorian range and names a real day.
pub const fn is_valid(year: i32, month: u8, day: u8) -> bool {
    if year < MIN_YEAR || year > MAX_YEAR {
        return false;
    }
    if month == 0 || month > MAX_MONTH {
        return false;
    }
    day != 0 && day <= days_in_month(year, month)
}

/// Like [`is_valid`] but for unchecked wide integers, e.g. digits pulled out of a string.
/// Values that don't fit the narrow types are simply invalid.
pub fn is_valid_wide(year: i64, month: i64, day: i64) -> bool {
    match (i32::try_from(year), u8::try_from(month), u8::try_from(day)) {
        (Ok(year), Ok(month), Ok(day)) => is_valid(year, month, day),
        _ => false,
    }
}

/// Leap days in the years `1..=year`, negative for years before 1.
const fn leap_days_through(year: i64) -> i64 {
    year.div_euclid(4) - year.div_euclid(100) + year.div_euclid(400)
}

/// Day count for a date. The date must satisfy [`is_valid`], or at least have a month in `1..=12`.
pub const fn epoch_from_parts(year: i32, month: u8, day: u8) -> Epoch {
    let year = year as i64;
    let leap = is_leap_year(year as i32) as usize;
    year * DAYS_IN_YEAR
        + leap_days_through(year - 1)
        + DAYS_BEFORE_MONTH[leap][month as usize]
        + day as i64
}

/// Inverse of [`epoch_from_parts`] for any epoch.
///
/// Whole 400 year cycles are taken off first, so whatever the epoch the year correction
/// below steps back at most twice. Past the reach of an `i32` year the result pins to
/// `i32::MIN`-01-01 or `i32::MAX`-12-31.
#[allow(clippy::cast_possible_truncation)]
pub const fn epoch_to_parts(epoch: Epoch) -> (i32, u8, u8) {
    let cycles = (epoch as i128 - 1).div_euclid(DAYS_IN_GREGORIAN_CYCLE as i128);
    // 1..=146_097, i.e. 0000-01-02 through 0400-01-01
    let epoch = (epoch as i128 - cycles * DAYS_IN_GREGORIAN_CYCLE as i128) as i64;

    let mut year = epoch / DAYS_IN_YEAR;
    let mut day = epoch % DAYS_IN_YEAR;
    if day == 0 {
        year -= 1;
        day = DAYS_IN_YEAR;
    }

    day -= leap_days_through(year - 1);

    while day <= 0 {
        year -= 1;
        day += if is_leap_year(year as i32) { 366 } else { 365 };
    }

    let table = &DAYS_BEFORE_MONTH[is_leap_year(year as i32) as usize];
    let mut month = 1;
    while table[month + 1] < day {
        month += 1;
    }
    day -= table[month];

    let year = year as i128 + cycles * GREGORIAN_CYCLE as i128;
    if year > i32::MAX as i128 {
        (i32::MAX, DECEMBER, DAYS_IN_MONTH[12])
    } else if year < i32::MIN as i128 {
        (i32::MIN, JANUARY, MIN_DAY)
    } else {
        (year as i32, month as u8, day as u8)
    }
}

/// [`epoch_to_parts`] limited to [`FIRST_EPOCH`]`..=`[`LAST_EPOCH`], `None` outside it.
pub const fn checked_epoch_to_parts(epoch: Epoch) -> Option<(i32, u8, u8)> {
    if epoch < FIRST_EPOCH || epoch > LAST_EPOCH {
        None
    } else {
        Some(epoch_to_parts(epoch))
    }
}

/// Day of the week, 0 for Sunday through 6 for Saturday.
pub const fn day_of_week(epoch: Epoch) -> u8 {
    ((epoch.rem_euclid(DAYS_IN_WEEK) + DAYS_IN_WEEK - 1) % DAYS_IN_WEEK) as u8
}

/// True for Monday through Friday.
pub const fn is_weekday(year: i32, month: u8, day: u8) -> bool {
    is_weekday_epoch(epoch_from_parts(year, month, day))
}

pub(crate) const fn is_weekday_epoch(epoch: Epoch) -> bool {
    let dow = day_of_week(epoch);
    dow >= MONDAY && dow <= FRIDAY
}
