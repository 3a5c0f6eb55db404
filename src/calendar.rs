//! Calendar arithmetic carried out on day counts and month indexes, never by stepping.

use crate::DateError;
use crate::consts::{
    DAYS_IN_WEEK, FRIDAY, MAX_YEAR, MIN_YEAR, MONDAY, MONTHS_IN_QUARTER, SATURDAY, WEEKDAYS_IN_WEEK,
};
use crate::epoch::{Epoch, day_of_week, epoch_to_parts};
use crate::prelude::*;
use crate::types::days_in_month;
use serde::{Deserialize, Serialize};

/// Adds `months` to a date, clamping the day to the length of the resulting month.
///
/// Jan 31 plus one month is Feb 28, or Feb 29 in a leap year.
#[allow(clippy::cast_possible_truncation)]
pub fn add_months(year: i32, month: u8, day: u8, months: i32) -> (i32, u8, u8) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(months);
    // Floor division keeps negative offsets on the right side of the year boundary
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u8 + 1;
    (year, month, day.min(days_in_month(year, month)))
}

/// Adds `weekdays`, Monday to Friday, to an epoch.
///
/// A Saturday or Sunday start counts from the preceding Friday when moving forward and from the
/// following Monday when moving back. Zero weekdays leaves any start where it is.
/// Counts too large for an epoch pin to the far end of the day count.
pub const fn add_weekdays(epoch: Epoch, weekdays: i64) -> (i32, u8, u8) {
    epoch_to_parts(epoch.saturating_add(weekday_offset(epoch, weekdays)))
}

/// Calendar days spanned by `weekdays` working days from `epoch`, saturating at the `i64` bounds.
pub(crate) const fn weekday_offset(epoch: Epoch, weekdays: i64) -> i64 {
    if weekdays == 0 {
        return 0;
    }

    let dow = day_of_week(epoch);
    let (start, shift) = if dow >= MONDAY && dow <= FRIDAY {
        (dow, 0)
    } else if weekdays > 0 {
        (FRIDAY, -(((dow + 1) % 7) as i64 + 1))
    } else {
        (MONDAY, if dow == SATURDAY { 2 } else { 1 })
    };

    let weeks = weekdays.div_euclid(WEEKDAYS_IN_WEEK);
    let days = weekdays.rem_euclid(WEEKDAYS_IN_WEEK);
    let landed = start as i64 + days;
    let weekend = if landed > 0 && landed < SATURDAY as i64 { 0 } else { 2 };

    weeks
        .saturating_mul(DAYS_IN_WEEK)
        .saturating_add(shift + days + weekend)
}

/// Weekdays between two epochs, counting the later day but not the earlier one.
///
/// `inclusive` adds the earlier day as well. The sign follows `to - from`, so swapping the
/// arguments negates the result.
pub const fn weekdays_between_epochs(from: Epoch, to: Epoch, inclusive: bool) -> i64 {
    let (first, last) = if from <= to { (from, to) } else { (to, from) };

    let first_dow = clip_to_friday(day_of_week(first));
    let last_dow = clip_to_friday(day_of_week(last));

    let mut count = (last - first) / DAYS_IN_WEEK * WEEKDAYS_IN_WEEK + last_dow - first_dow;
    if day_of_week(last) < day_of_week(first) {
        count += WEEKDAYS_IN_WEEK;
    }
    if inclusive {
        count += 1;
    }

    if to < from { -count } else { count }
}

const fn clip_to_friday(dow: u8) -> i64 {
    if dow > FRIDAY { FRIDAY as i64 } else { dow as i64 }
}

/// Complete months from the first date to the second, negative when the second is earlier.
///
/// A month is complete once the same day-of-month is reached, or once the later date is the last
/// day of its month: Jan 31 to Feb 28 is one month.
pub fn months_between(from: (i32, u8, u8), to: (i32, u8, u8)) -> i32 {
    let (earlier, later, sign) = if from <= to { (from, to, 1) } else { (to, from, -1) };

    let (y1, m1, d1) = earlier;
    let (y2, m2, d2) = later;

    let short = d2 < d1 && d2 != days_in_month(y2, m2);
    let months = (y2 - y1) * 12 + i32::from(m2) - i32::from(m1) - i32::from(short);
    months * sign
}

/// Last day of the month holding the given year and month.
pub const fn last_day_of_month(year: i32, month: u8) -> (i32, u8, u8) {
    (year, month, days_in_month(year, month))
}

/// A calendar quarter, displayed as `2022Q1`.
///
/// Serializes as its packed `Ym` quarter end, the same integer [`Quarter::to_packed`] gives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{year}Q{number}")]
#[serde(try_from = "i64", into = "i64")]
pub struct Quarter {
    year: i32,
    number: u8,
}

impl Quarter {
    /// The year the quarter falls in
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number, 1 to 4
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Month the quarter ends in, 3, 6, 9 or 12
    pub const fn end_month(&self) -> u8 {
        self.number * MONTHS_IN_QUARTER
    }

    /// Quarter end as a packed `Ym` integer, e.g. `202203`
    pub const fn to_packed(&self) -> i64 {
        self.year as i64 * 100 + self.end_month() as i64
    }
}

/// Reads a packed quarter end such as `202209`. Other months and unsupported years are refused.
impl TryFrom<i64> for Quarter {
    type Error = DateError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(packed: i64) -> Result<Self, Self::Error> {
        let (year, month) = (packed.div_euclid(100), packed.rem_euclid(100));
        let month_ok = month != 0 && month % i64::from(MONTHS_IN_QUARTER) == 0 && month <= 12;
        if !month_ok || !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(DateError::InvalidPacked(packed));
        }
        Ok(quarter(year as i32, month as u8))
    }
}

impl From<Quarter> for i64 {
    fn from(quarter: Quarter) -> Self {
        quarter.to_packed()
    }
}

/// The quarter containing `month` of `year`. `month` must be in `1..=12`.
pub const fn quarter(year: i32, month: u8) -> Quarter {
    Quarter {
        year,
        number: (month - 1) / MONTHS_IN_QUARTER + 1,
    }
}

#[cfg(test)]
#[allow(clippy::inconsistent_digit_grouping)]
mod tests {
    use super::*;
    use crate::epoch::{epoch_from_parts, is_weekday};
    use quickcheck::{TestResult, quickcheck};

    fn ymd(packed: i64) -> (i32, u8, u8) {
        crate::packed::to_parts(packed).unwrap()
    }

    #[test]
    fn test_add_months_cases() {
        struct TestCase {
            input: i64,
            months: i32,
            answer: i64,
            description: &'static str,
        }

        let cases = [
            TestCase { input: 2022_01_01, months: 10, answer: 2022_11_01, description: "from 1/1" },
            TestCase {
                input: 2022_12_01,
                months: 1,
                answer: 2023_01_01,
                description: "spanning year",
            },
            TestCase {
                input: 2022_01_31,
                months: -1,
                answer: 2021_12_31,
                description: "minus spanning year",
            },
            TestCase {
                input: 2022_01_29,
                months: 1,
                answer: 2022_02_28,
                description: "29/1 non leap",
            },
            TestCase {
                input: 2022_01_30,
                months: 1,
                answer: 2022_02_28,
                description: "30/1 non leap",
            },
            TestCase {
                input: 2022_01_31,
                months: 1,
                answer: 2022_02_28,
                description: "31/1 non leap",
            },
            TestCase { input: 2020_01_29, months: 1, answer: 2020_02_29, description: "29/1 leap" },
            TestCase { input: 2020_01_30, months: 1, answer: 2020_02_29, description: "30/1 leap" },
            TestCase { input: 2020_01_31, months: 1, answer: 2020_02_29, description: "31/1 leap" },
            TestCase {
                input: 2022_03_29,
                months: -1,
                answer: 2022_02_28,
                description: "29/3 - 1 non leap",
            },
            TestCase {
                input: 2022_03_31,
                months: -1,
                answer: 2022_02_28,
                description: "31/3 - 1 non leap",
            },
            TestCase {
                input: 2020_03_30,
                months: -1,
                answer: 2020_02_29,
                description: "30/3 - 1 leap",
            },
            TestCase {
                input: 2020_03_31,
                months: -1,
                answer: 2020_02_29,
                description: "31/3 - 1 leap",
            },
            TestCase {
                input: 2019_02_28,
                months: 12,
                answer: 2020_02_28,
                description: "ends on leap year",
            },
            TestCase {
                input: 2019_02_28,
                months: 24,
                answer: 2021_02_28,
                description: "spans leap year",
            },
            TestCase {
                input: 2020_02_29,
                months: -12,
                answer: 2019_02_28,
                description: "leap day back a year",
            },
            TestCase {
                input: 2021_02_28,
                months: -24,
                answer: 2019_02_28,
                description: "back over leap year",
            },
            TestCase {
                input: 2022_05_15,
                months: -12,
                answer: 2021_05_15,
                description: "exactly minus a year",
            },
            TestCase {
                input: 2022_05_15,
                months: -17,
                answer: 2020_12_15,
                description: "minus 17 months",
            },
            TestCase {
                input: 2022_05_15,
                months: -5,
                answer: 2021_12_15,
                description: "back to December",
            },
        ];

        for case in &cases {
            let (y, m, d) = ymd(case.input);
            let result = add_months(y, m, d, case.months);
            assert_eq!(
                result,
                ymd(case.answer),
                "{} {:+}: {}",
                case.input,
                case.months,
                case.description
            );
        }
    }

    struct WeekdayCase {
        input: i64,
        weekdays: i64,
        answer: i64,
        description: &'static str,
    }

    const WEEKDAY_CASES: [WeekdayCase; 6] = [
        WeekdayCase {
            input: 2022_01_10,
            weekdays: 4,
            answer: 2022_01_14,
            description: "same week",
        },
        WeekdayCase {
            input: 2022_01_10,
            weekdays: 9,
            answer: 2022_01_21,
            description: "span weekend",
        },
        WeekdayCase {
            input: 2022_01_10,
            weekdays: 11,
            answer: 2022_01_25,
            description: "span two weekends",
        },
        WeekdayCase {
            input: 2022_01_11,
            weekdays: 40,
            answer: 2022_03_08,
            description: "span months",
        },
        WeekdayCase {
            input: 2022_01_11,
            weekdays: 400,
            answer: 2023_07_25,
            description: "span years",
        },
        WeekdayCase {
            input: 2020_02_03,
            weekdays: 28,
            answer: 2020_03_12,
            description: "leap year",
        },
    ];

    fn epoch_of(packed: i64) -> Epoch {
        let (y, m, d) = ymd(packed);
        epoch_from_parts(y, m, d)
    }

    #[test]
    fn test_add_weekdays() {
        for case in &WEEKDAY_CASES {
            assert_eq!(
                add_weekdays(epoch_of(case.input), case.weekdays),
                ymd(case.answer),
                "{}",
                case.description
            );
            assert_eq!(
                add_weekdays(epoch_of(case.answer), -case.weekdays),
                ymd(case.input),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_weekdays_between() {
        for case in &WEEKDAY_CASES {
            let from = epoch_of(case.input);
            let to = epoch_of(case.answer);
            assert_eq!(
                weekdays_between_epochs(from, to, false),
                case.weekdays,
                "{}",
                case.description
            );
            assert_eq!(
                weekdays_between_epochs(to, from, false),
                -case.weekdays,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_weekdays_between_inclusive_and_same_day() {
        let monday = epoch_of(2022_01_10);
        assert_eq!(weekdays_between_epochs(monday, monday, false), 0);
        assert_eq!(weekdays_between_epochs(monday, monday + 4, true), 5);
    }

    #[test]
    fn test_weekdays_between_weekend_endpoints() {
        let saturday = epoch_of(2022_01_15);
        let sunday = epoch_of(2022_01_16);
        let monday = epoch_of(2022_01_17);
        assert_eq!(weekdays_between_epochs(saturday, sunday, false), 0);
        assert_eq!(weekdays_between_epochs(saturday, monday, false), 1);
        assert_eq!(weekdays_between_epochs(sunday, monday, false), 1);
        assert_eq!(weekdays_between_epochs(epoch_of(2022_01_10), saturday, false), 4);
    }

    #[test]
    fn test_add_weekdays_from_weekend() {
        let saturday = epoch_of(2022_01_15);
        let sunday = epoch_of(2022_01_16);
        assert_eq!(add_weekdays(saturday, 0), ymd(2022_01_15));
        assert_eq!(add_weekdays(saturday, 1), ymd(2022_01_17));
        assert_eq!(add_weekdays(sunday, 1), ymd(2022_01_17));
        assert_eq!(add_weekdays(sunday, 5), ymd(2022_01_21));
        assert_eq!(add_weekdays(saturday, -1), ymd(2022_01_14));
        assert_eq!(add_weekdays(sunday, -1), ymd(2022_01_14));
        assert_eq!(add_weekdays(sunday, -5), ymd(2022_01_10));
    }

    quickcheck! {
        fn prop_add_weekdays_inverse(offset: u16, weekdays: i16) -> TestResult {
            let start = epoch_of(2000_01_03) + i64::from(offset);
            let (y, m, d) = epoch_to_parts(start);
            if !is_weekday(y, m, d) {
                return TestResult::discard();
            }
            let n = i64::from(weekdays);
            let (y, m, d) = add_weekdays(start, n);
            let back = add_weekdays(epoch_from_parts(y, m, d), -n);
            TestResult::from_bool(back == epoch_to_parts(start))
        }

        fn prop_add_weekdays_lands_on_weekday(offset: u16, weekdays: i16) -> TestResult {
            if weekdays == 0 {
                return TestResult::discard();
            }
            let start = epoch_of(2000_01_01) + i64::from(offset);
            let (y, m, d) = add_weekdays(start, i64::from(weekdays));
            TestResult::from_bool(is_weekday(y, m, d))
        }

        fn prop_weekdays_between_counts_additions(offset: u16, weekdays: i16) -> TestResult {
            let start = epoch_of(2000_01_03) + i64::from(offset);
            let (y, m, d) = epoch_to_parts(start);
            if !is_weekday(y, m, d) {
                return TestResult::discard();
            }
            let n = i64::from(weekdays);
            let (y, m, d) = add_weekdays(start, n);
            let end = epoch_from_parts(y, m, d);
            TestResult::from_bool(weekdays_between_epochs(start, end, false) == n)
        }

        fn prop_weekdays_between_antisymmetric(a: i32, b: i32) -> bool {
            let (a, b) = (i64::from(a), i64::from(b));
            weekdays_between_epochs(a, b, false) == -weekdays_between_epochs(b, a, false)
        }
    }

    #[test]
    fn test_months_between_grid() {
        // 50 start days from 2019-07-01, each against 50 clamped month additions
        let start = epoch_of(2019_07_01);
        for day in 0..50 {
            let from = epoch_to_parts(start + day);
            for months in 0..50 {
                let to = add_months(from.0, from.1, from.2, months);
                assert_eq!(months_between(from, to), months, "{from:?} -> {to:?}");
                assert_eq!(months_between(to, from), -months, "{to:?} -> {from:?}");
            }
        }
    }

    #[test]
    fn test_months_between_month_end() {
        assert_eq!(months_between((2022, 1, 31), (2022, 2, 28)), 1);
        assert_eq!(months_between((2022, 1, 31), (2022, 2, 27)), 0);
        assert_eq!(months_between((2022, 1, 15), (2022, 2, 14)), 0);
        assert_eq!(months_between((2022, 1, 15), (2022, 2, 15)), 1);
        assert_eq!(months_between((2022, 1, 15), (2022, 1, 15)), 0);
        assert_eq!(months_between((2023, 3, 31), (2022, 1, 31)), -14);
    }

    #[test]
    fn test_quarter() {
        for month in 1..=12u8 {
            let q = quarter(2022, month);
            let expected = (month - 1) / 3 + 1;
            assert_eq!(q.number(), expected);
            assert_eq!(q.to_string(), format!("2022Q{expected}"));
            assert_eq!(q.to_packed(), 2022_00 + i64::from(expected) * 3);
        }
        assert_eq!(quarter(2022, 1).to_packed(), 2022_03);
        assert_eq!(quarter(2022, 12).to_string(), "2022Q4");
    }

    #[test]
    fn test_add_weekdays_saturates() {
        let monday = epoch_of(2022_01_10);
        assert_eq!(weekday_offset(monday, i64::MAX), i64::MAX);
        assert!(weekday_offset(monday, i64::MIN) < i64::MIN / 2);
        assert_eq!(add_weekdays(monday, i64::MAX), (i32::MAX, 12, 31));
        assert_eq!(add_weekdays(monday, i64::MIN), (i32::MIN, 1, 1));

        let saturday = epoch_of(2022_01_15);
        assert_eq!(add_weekdays(saturday, i64::MAX), (i32::MAX, 12, 31));
        assert_eq!(add_weekdays(saturday, i64::MIN), (i32::MIN, 1, 1));
        assert_eq!(add_weekdays(i64::MAX, 1), (i32::MAX, 12, 31));
        assert_eq!(add_weekdays(i64::MIN, -1), (i32::MIN, 1, 1));
    }

    #[test]
    fn test_quarter_serde() {
        let q = quarter(2022, 8);
        assert_eq!(serde_json::to_string(&q).unwrap(), "202209");
        assert_eq!(serde_json::from_str::<Quarter>("202209").unwrap(), q);
        assert_eq!(serde_json::from_str::<Quarter>("999912").unwrap().to_string(), "9999Q4");

        for bad in ["202227", "202200", "202208", "202215", "158212", "1000003", "-202203"] {
            assert!(serde_json::from_str::<Quarter>(bad).is_err(), "{bad}");
        }
        assert_eq!(Quarter::try_from(2022_27), Err(DateError::InvalidPacked(2022_27)));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2020, 2), (2020, 2, 29));
        assert_eq!(last_day_of_month(2021, 2), (2021, 2, 28));
        assert_eq!(last_day_of_month(2021, 4), (2021, 4, 30));
    }
}
