/// Minimum supported year (inclusive), the first full year of the Gregorian calendar
pub const MIN_YEAR: i32 = 1583;
/// Maximum supported year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds and packed defaults
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days elapsed in the year before the first of each month, for non-leap and leap years.
/// Index 13 holds the length of the year so a month scan always terminates.
pub(crate) const DAYS_BEFORE_MONTH: [[i64; 14]; 2] = [
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365],
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366],
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a common year
pub(crate) const DAYS_IN_YEAR: i64 = 365;
/// Days in one full 400 year Gregorian cycle: 97 * 366 + 303 * 365
pub(crate) const DAYS_IN_GREGORIAN_CYCLE: i64 = 146_097;

/// Calendar days in a week
pub const DAYS_IN_WEEK: i64 = 7;
/// Monday to Friday
pub const WEEKDAYS_IN_WEEK: i64 = 5;

/// Day of week numbers as returned by `day_of_week`
pub const SUNDAY: u8 = 0;
/// Day of week number for Monday
pub const MONDAY: u8 = 1;
/// Day of week number for Friday
pub const FRIDAY: u8 = 5;
/// Day of week number for Saturday
pub const SATURDAY: u8 = 6;

/// Months in a quarter
pub const MONTHS_IN_QUARTER: u8 = 3;

/// Largest packed value read as `Ym`, anything above is `Ymd`
pub const MAX_PACKED_YM: i64 = 999_999;
/// Largest packed value read as a bare year, anything above is `Ym`
pub const MAX_PACKED_Y: i64 = 9999;

/// Default two digit year pivot is this many years before the current year
pub const PIVOT_LOOKBACK_YEARS: i32 = 80;

/// Digits in a full `Ymd` date, the upper bound for date digits in a sample
pub const YMD_DIGITS: usize = 8;

/// Separator between the parts of an ISO 8601 style date, `2022-01-15`
pub const DATE_SEPARATOR: char = '-';

/// Default separator between a date and its time component, as in ISO 8601
pub const TIME_SEPARATOR: char = 'T';
