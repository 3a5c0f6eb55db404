//! Field layouts a date can take, and turning digits into date parts by layout.

use super::format::{Field, Part};
use super::text;
use crate::consts::{JANUARY, MIN_DAY};
use crate::epoch;

/// Date fields in the order they appear.
pub(crate) type Layout = &'static [Field];

const Y4: Field = Field::new(Part::Year, 4);
const Y2: Field = Field::new(Part::Year, 2);
const M2: Field = Field::new(Part::Month, 2);
const D2: Field = Field::new(Part::Day, 2);

// Nobody puts the year in the middle
static EIGHT: [Layout; 4] = [&[Y4, M2, D2], &[Y4, D2, M2], &[M2, D2, Y4], &[D2, M2, Y4]];
static SIX_SHORT_YEAR: [Layout; 4] = [&[Y2, M2, D2], &[Y2, D2, M2], &[M2, D2, Y2], &[D2, M2, Y2]];
static SIX: [Layout; 2] = [&[Y4, M2], &[M2, Y4]];
static FOUR: [Layout; 2] = [&[Y2, M2], &[M2, Y2]];

/// Layouts holding `digits` digits in total. Six digits are either a full date with a two digit
/// year or a year and month, depending on `short_year`.
pub(crate) fn catalog(digits: usize, short_year: bool) -> &'static [Layout] {
    match (digits, short_year) {
        (8, _) => &EIGHT,
        (6, true) => &SIX_SHORT_YEAR,
        (6, false) => &SIX,
        (4, _) => &FOUR,
        _ => &[],
    }
}

pub(crate) fn year_first(layout: &[Field]) -> bool {
    layout.first().is_some_and(|f| f.part == Part::Year)
}

pub(crate) fn year_last(layout: &[Field]) -> bool {
    layout.last().is_some_and(|f| f.part == Part::Year)
}

pub(crate) fn has_short_year(layout: &[Field]) -> bool {
    layout.iter().any(|f| f.is_short_year())
}

/// Puts a two digit year in the century that follows `pivot`, e.g. with pivot 1946
/// 46 to 99 become 1946 to 1999 and 0 to 45 become 2000 to 2045.
pub(crate) const fn expand_year(yy: i64, pivot: i32) -> i64 {
    let pivot = pivot as i64;
    let century = pivot / 100 + if yy < pivot % 100 { 1 } else { 0 };
    yy + century * 100
}

/// Cuts a run of digits into field values from the right, so only the leftmost field may come
/// up short, as when a leading zero was lost. More digits than the layout holds is an error.
pub(crate) fn split_digits(layout: &[Field], digits: &str) -> Option<Vec<i64>> {
    let capacity: usize = layout.iter().map(|f| usize::from(f.width)).sum();
    if !text::is_digits(digits) || digits.len() > capacity {
        return None;
    }

    let mut values = vec![0; layout.len()];
    let mut end = digits.len();
    for (value, field) in values.iter_mut().zip(layout).rev() {
        if end == 0 {
            return None;
        }
        let start = end.saturating_sub(usize::from(field.width));
        *value = digits[start..end].parse().ok()?;
        end = start;
    }
    Some(values)
}

/// One token per field, each no wider than its field.
pub(crate) fn split_tokens(layout: &[Field], tokens: &[&str]) -> Option<Vec<i64>> {
    if tokens.len() != layout.len() {
        return None;
    }
    layout
        .iter()
        .zip(tokens)
        .map(|(field, token)| {
            if text::is_digits(token) && token.len() <= usize::from(field.width) {
                token.parse().ok()
            } else {
                None
            }
        })
        .collect()
}

/// Builds a validated date from field values, expanding two digit years around `pivot`.
/// A layout without a month or day means the 1st.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn assemble(layout: &[Field], values: &[i64], pivot: i32) -> Option<(i32, u8, u8)> {
    let mut year = None;
    let mut month = i64::from(JANUARY);
    let mut day = i64::from(MIN_DAY);
    for (field, &value) in layout.iter().zip(values) {
        match field.part {
            Part::Year if field.is_short_year() => year = Some(expand_year(value, pivot)),
            Part::Year => year = Some(value),
            Part::Month => month = value,
            Part::Day => day = value,
        }
    }
    let year = year?;
    // is_valid_wide guarantees each part fits its narrow type
    epoch::is_valid_wide(year, month, day).then_some((year as i32, month as u8, day as u8))
}
