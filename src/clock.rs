//! The current civil year, read once from the system clock.

use crate::consts::PIVOT_LOOKBACK_YEARS;
use crate::epoch::{epoch_from_parts, epoch_to_parts};
use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// Current year in UTC.
///
/// A clock set before 1970 is read as counting backwards from it.
#[allow(clippy::cast_possible_wrap)]
pub fn current_year() -> i32 {
    let unix_day = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since) => (since.as_secs() / SECONDS_PER_DAY) as i64,
        Err(err) => -((err.duration().as_secs() / SECONDS_PER_DAY) as i64) - 1,
    };
    epoch_to_parts(epoch_from_parts(1970, 1, 1) + unix_day).0
}

/// Pivot used for two digit years when none is configured.
pub fn default_pivot() -> i32 {
    current_year() - PIVOT_LOOKBACK_YEARS
}
