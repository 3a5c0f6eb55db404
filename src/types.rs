//! Validated date parts and the two rules everything else rests on: leap years and month lengths.

use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU8, NonZeroU16};

/// A year in `MIN_YEAR..=MAX_YEAR`, the first full Gregorian year through 9999.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}", "_0")]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `DateError::InvalidYear` outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(value: i32) -> Result<Self, DateError> {
        u16::try_from(value)
            .ok()
            .filter(|_| (MIN_YEAR..=MAX_YEAR).contains(&value))
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(DateError::InvalidYear(value))
    }

    #[inline]
    pub fn get(self) -> i32 {
        i32::from(self.0.get())
    }

    pub fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

/// A month number, 1 for January through 12.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:02}", "_0")]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `DateError::InvalidMonth` for 0 or anything past December.
    pub fn new(value: u8) -> Result<Self, DateError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(DateError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// A day of the month. Only [`Day::new`] knows the month, so only it checks the month's length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:02}", "_0")]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// The 1st, valid in every month
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// The last day of the given month
    pub fn last_of_month(year: Year, month: Month) -> Self {
        NonZeroU8::new(days_in_month(year.get(), month.get())).map_or(Self::FIRST, Self)
    }

    /// # Errors
    /// Returns `DateError::InvalidDay` if `value` isn't a day of `month` in `year`.
    pub fn new(value: u8, year: i32, month: u8) -> Result<Self, DateError> {
        let fits = (1..=MAX_MONTH).contains(&month) && value <= days_in_month(year, month);
        match NonZeroU8::new(value) {
            Some(day) if fits => Ok(Self(day)),
            _ => Err(DateError::InvalidDay {
                year,
                month,
                day: value,
            }),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<i32> for Year {
    type Error = DateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Accepts the days every month has. Year and month are reported as 0 on failure.
impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // January is as long as any month
        if (MIN_DAY..=DAYS_IN_MONTH[1]).contains(&value) {
            Self::new(value, MIN_YEAR, 1)
        } else {
            Err(DateError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            })
        }
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

/// Gregorian leap year rule, applied proleptically to any year including negative ones.
pub const fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Length of `month` in `year`. `month` must be in `1..=12`.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
