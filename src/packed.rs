//! Helpers over dates packed into a single integer, `20220115` for 2022-01-15.
//!
//! Values above [`MAX_PACKED_YM`] are read as `Ymd`, values above [`MAX_PACKED_Y`] as `Ym` with the
//! day defaulting to the 1st, anything smaller as a bare year on January 1st. Every function
//! returns `None` when its input doesn't unpack to a valid date rather than computing something
//! meaningless from it.

use crate::calendar::{self, Quarter};
use crate::consts::{JANUARY, MAX_PACKED_Y, MAX_PACKED_YM, MIN_DAY};
use crate::epoch::{self, Epoch};

/// Splits a packed integer into raw year, month and day, without validation.
pub const fn explode(packed: i64) -> (i64, i64, i64) {
    if packed > MAX_PACKED_YM {
        (packed / 10_000, packed % 10_000 / 100, packed % 100)
    } else if packed > MAX_PACKED_Y {
        (packed / 100, packed % 100, MIN_DAY as i64)
    } else {
        (packed, JANUARY as i64, MIN_DAY as i64)
    }
}

/// Packs date parts into a `Ymd` integer.
pub const fn glue(year: i32, month: u8, day: u8) -> i64 {
    year as i64 * 10_000 + month as i64 * 100 + day as i64
}

/// Unpacks and validates.
#[allow(clippy::cast_possible_truncation)]
pub fn to_parts(packed: i64) -> Option<(i32, u8, u8)> {
    let (year, month, day) = explode(packed);
    // is_valid_wide guarantees each part fits its narrow type
    epoch::is_valid_wide(year, month, day).then_some((year as i32, month as u8, day as u8))
}

fn to_epoch(packed: i64) -> Option<Epoch> {
    to_parts(packed).map(|(y, m, d)| epoch::epoch_from_parts(y, m, d))
}

fn from_epoch(epoch: Epoch) -> Option<i64> {
    epoch::checked_epoch_to_parts(epoch).map(|(y, m, d)| glue(y, m, d))
}

fn glue_checked((year, month, day): (i32, u8, u8)) -> Option<i64> {
    epoch::is_valid(year, month, day).then_some(glue(year, month, day))
}

/// Checks the packed value is a valid date
pub fn is_valid(packed: i64) -> bool {
    to_parts(packed).is_some()
}

/// Adds calendar days. Negative days go back.
pub fn add_days(packed: i64, days: i64) -> Option<i64> {
    from_epoch(to_epoch(packed)?.checked_add(days)?)
}

/// Adds months, clamping the day to the end of the resulting month.
pub fn add_months(packed: i64, months: i32) -> Option<i64> {
    let (y, m, d) = to_parts(packed)?;
    glue_checked(calendar::add_months(y, m, d, months))
}

/// Adds weekdays, Monday to Friday.
pub fn add_weekdays(packed: i64, weekdays: i64) -> Option<i64> {
    let epoch = to_epoch(packed)?;
    from_epoch(epoch.saturating_add(calendar::weekday_offset(epoch, weekdays)))
}

/// Day of week, 0 for Sunday through 6 for Saturday.
pub fn day_of_week(packed: i64) -> Option<u8> {
    to_epoch(packed).map(epoch::day_of_week)
}

/// True for Monday through Friday.
pub fn is_weekday(packed: i64) -> bool {
    to_epoch(packed).is_some_and(epoch::is_weekday_epoch)
}

/// Calendar days from `from` to `to`.
pub fn days_between(from: i64, to: i64) -> Option<i64> {
    Some(to_epoch(to)? - to_epoch(from)?)
}

/// Weekdays from `from` to `to`, see [`calendar::weekdays_between_epochs`].
pub fn weekdays_between(from: i64, to: i64, inclusive: bool) -> Option<i64> {
    Some(calendar::weekdays_between_epochs(
        to_epoch(from)?,
        to_epoch(to)?,
        inclusive,
    ))
}

/// Complete months from `from` to `to`, see [`calendar::months_between`].
pub fn months_between(from: i64, to: i64) -> Option<i32> {
    Some(calendar::months_between(to_parts(from)?, to_parts(to)?))
}

/// First day of a `Ym` month as `Ymd`.
pub fn first_day(year_month: i64) -> Option<i64> {
    let (y, m, _) = to_parts(year_month.checked_mul(100)?.checked_add(1)?)?;
    Some(glue(y, m, MIN_DAY))
}

/// Last day of a `Ym` month as `Ymd`.
pub fn last_day(year_month: i64) -> Option<i64> {
    let (y, m, _) = to_parts(year_month.checked_mul(100)?.checked_add(1)?)?;
    let (y, m, d) = calendar::last_day_of_month(y, m);
    Some(glue(y, m, d))
}

/// Quarter of a `Ymd` or `Ym` value.
pub fn quarter(packed: i64) -> Option<Quarter> {
    let (y, m, _) = to_parts(packed)?;
    Some(calendar::quarter(y, m))
}
