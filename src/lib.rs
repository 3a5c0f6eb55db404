//! Calendar arithmetic on plain integers, and working out how dates are written.
//!
//! Dates are `(year, month, day)` triples or packed integers like `20220115`. Every calculation
//! goes through a running day count ([`epoch`]) so month and weekday arithmetic never steps one
//! day at a time. [`Ymd`] wraps a validated date for callers who want a value type.
//!
//! ```
//! use undated::Ymd;
//!
//! let date: Ymd = "2022-01-31".parse()?;
//! assert_eq!(date.add_months(1, false)?.to_packed(), 2022_02_28);
//! assert_eq!(date.add_weekdays(1)?.to_string(), "2022-02-01");
//! # Ok::<(), undated::DateError>(())
//! ```

#[macro_use]
mod logging;

pub mod calendar;
mod clock;
mod consts;
pub mod epoch;
pub mod infer;
pub mod packed;
mod prelude;
mod types;

pub use calendar::Quarter;
pub use consts::*;
pub use epoch::Epoch;
pub use infer::{Deriver, DeriverConfig, Format, FormatError, Hint, Language};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Sub;
use std::str::FromStr;

/// A validated calendar date together with its day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
#[serde(try_from = "i64", into = "i64")]
pub struct Ymd {
    year: Year,
    month: Month,
    day: Day,
    epoch: Epoch,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Invalid packed date: {_0}")]
    InvalidPacked(i64),
    #[display(fmt = "Day count {} is outside {}-{}", "_0", MIN_YEAR, MAX_YEAR)]
    OutOfRange(Epoch),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

/// Anything a date can be built from, see [`Ymd::from_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DateInput<'a> {
    /// A packed `Ymd`, `Ym` or `Y` integer
    Packed(i64),
    /// An ISO style string or packed digits
    Text(&'a str),
    /// Year, month and day
    Parts(i32, u8, u8),
    /// An existing date
    Date(Ymd),
}

impl Ymd {
    /// Validates the parts of a date.
    ///
    /// # Errors
    /// Returns the error of the first part that is out of range, checking year, month then day.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year.get(), month.get())?;
        Ok(Self::from_valid(year, month, day))
    }

    fn from_valid(year: Year, month: Month, day: Day) -> Self {
        Self {
            year,
            month,
            day,
            epoch: epoch::epoch_from_parts(year.get(), month.get(), day.get()),
        }
    }

    /// Reads a packed integer; see [`packed`] for the accepted shapes.
    ///
    /// # Errors
    /// Returns `DateError::InvalidPacked` for negative values or parts too large to be a date, and
    /// the error of the offending part otherwise.
    pub fn from_packed(packed: i64) -> Result<Self, DateError> {
        if packed < 0 {
            return Err(DateError::InvalidPacked(packed));
        }
        let (year, month, day) = packed::explode(packed);
        match (i32::try_from(year), u8::try_from(month), u8::try_from(day)) {
            (Ok(year), Ok(month), Ok(day)) => Self::new(year, month, day),
            _ => Err(DateError::InvalidPacked(packed)),
        }
    }

    /// The date with the given day count.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` when the day count falls outside the supported years.
    pub fn from_epoch(epoch: Epoch) -> Result<Self, DateError> {
        let (year, month, day) =
            epoch::checked_epoch_to_parts(epoch).ok_or(DateError::OutOfRange(epoch))?;
        Self::new(year, month, day).map_err(|_| DateError::OutOfRange(epoch))
    }

    /// Builds a date from any [`DateInput`].
    ///
    /// ```
    /// use undated::Ymd;
    ///
    /// let date = Ymd::from_input(2022_01_15_i64)?;
    /// assert_eq!(Ymd::from_input("2022-01-15")?, date);
    /// assert_eq!(Ymd::from_input((2022_i32, 1_u8, 15_u8))?, date);
    /// # Ok::<(), undated::DateError>(())
    /// ```
    ///
    /// # Errors
    /// Fails the same way the matching constructor does.
    pub fn from_input<'a>(input: impl Into<DateInput<'a>>) -> Result<Self, DateError> {
        match input.into() {
            DateInput::Packed(packed) => Self::from_packed(packed),
            DateInput::Text(text) => text.parse(),
            DateInput::Parts(year, month, day) => Self::new(year, month, day),
            DateInput::Date(date) => Ok(date),
        }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Year, month and day as plain integers
    pub fn parts(&self) -> (i32, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// Packs the date as `YYYYMMDD`
    pub fn to_packed(&self) -> i64 {
        let (year, month, day) = self.parts();
        packed::glue(year, month, day)
    }

    /// Adds calendar days, negative to go back.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn add_days(&self, days: i64) -> Result<Self, DateError> {
        Self::from_epoch(self.epoch.saturating_add(days))
    }

    /// Adds months, clamping the day to the length of the resulting month.
    ///
    /// With `period` set the result is the last day of the period that starts on this date
    /// instead: one day earlier when moving forward, one day later when moving back. So
    /// 2022-01-01 plus 12 months is 2022-12-31.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn add_months(&self, months: i32, period: bool) -> Result<Self, DateError> {
        let (year, month, day) = self.parts();
        let (year, month, day) = calendar::add_months(year, month, day, months);
        let shifted = Self::new(year, month, day)
            .map_err(|_| DateError::OutOfRange(epoch::epoch_from_parts(year, month, day)))?;
        if period {
            shifted.add_days(if months < 0 { 1 } else { -1 })
        } else {
            Ok(shifted)
        }
    }

    /// Adds whole years, as twelve months each. Feb 29 becomes Feb 28 outside leap years.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn add_years(&self, years: i32, period: bool) -> Result<Self, DateError> {
        let months = years
            .checked_mul(12)
            .ok_or(DateError::OutOfRange(self.epoch))?;
        self.add_months(months, period)
    }

    /// Adds weekdays, Monday to Friday. A weekend start counts from the Friday before when moving
    /// forward and from the Monday after when moving back.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn add_weekdays(&self, weekdays: i64) -> Result<Self, DateError> {
        let offset = calendar::weekday_offset(self.epoch, weekdays);
        Self::from_epoch(self.epoch.saturating_add(offset))
    }

    /// Calendar days from this date to `other`, negative when `other` is earlier.
    pub const fn days_between(&self, other: &Self) -> i64 {
        other.epoch - self.epoch
    }

    /// Complete months from this date to `other`, negative when `other` is earlier.
    pub fn months_between(&self, other: &Self) -> i32 {
        calendar::months_between(self.parts(), other.parts())
    }

    /// Weekdays from this date to `other`, see [`calendar::weekdays_between_epochs`].
    pub const fn weekdays_between(&self, other: &Self, inclusive: bool) -> i64 {
        calendar::weekdays_between_epochs(self.epoch, other.epoch, inclusive)
    }

    pub fn quarter(&self) -> Quarter {
        calendar::quarter(self.year.get(), self.month.get())
    }

    /// 0 for Sunday through 6 for Saturday
    pub const fn day_of_week(&self) -> u8 {
        epoch::day_of_week(self.epoch)
    }

    pub const fn is_weekday(&self) -> bool {
        epoch::is_weekday_epoch(self.epoch)
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year.get())
    }

    /// The 1st of this date's month
    pub fn first_of_month(&self) -> Self {
        Self::from_valid(self.year, self.month, Day::FIRST)
    }

    /// The last day of this date's month
    pub fn last_of_month(&self) -> Self {
        Self::from_valid(self.year, self.month, Day::last_of_month(self.year, self.month))
    }

    fn parse_part<T: FromStr>(part: &str) -> Result<T, DateError> {
        part.trim()
            .parse()
            .map_err(|_| DateError::InvalidFormat(part.to_owned()))
    }
}

impl FromStr for Ymd {
    type Err = DateError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM`, or packed digits such as `20220115`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Self::from_packed(Self::parse_part(trimmed)?);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        match parts.as_slice() {
            [year, month] => Self::new(Self::parse_part(year)?, Self::parse_part(month)?, MIN_DAY),
            [year, month, day] => Self::new(
                Self::parse_part(year)?,
                Self::parse_part(month)?,
                Self::parse_part(day)?,
            ),
            _ => Err(DateError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

impl PartialOrd for Ymd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ymd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch.cmp(&other.epoch)
    }
}

/// Days between two dates, `later - earlier` is positive.
impl Sub for Ymd {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        rhs.days_between(&self)
    }
}

impl TryFrom<i64> for Ymd {
    type Error = DateError;

    fn try_from(packed: i64) -> Result<Self, Self::Error> {
        Self::from_packed(packed)
    }
}

impl From<Ymd> for i64 {
    fn from(date: Ymd) -> Self {
        date.to_packed()
    }
}
