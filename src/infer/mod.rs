//! Working out how dates are written from a handful of samples.
//!
//! ```
//! use undated::infer::Deriver;
//!
//! let format = Deriver::new().search(["12092022", "13092022"]).unwrap();
//! assert_eq!(format.to_string(), "dmY");
//! assert_eq!(format.parts_from_str("12092022"), Some((2022, 9, 12)));
//! ```
//!
//! Samples are tried in order and the first one that fits exactly one layout decides the format.
//! A sample that fits several layouts, like `12092022`, is passed over; so is one whose month
//! name is shared by several languages, though the languages it named are the only ones tried
//! for the rest of the batch.

mod format;
mod layout;
mod months;
mod text;

pub use format::{Field, Format, MonthToken, Part, Step};
pub use months::Language;

use crate::clock;
use crate::consts::{MAX_YEAR, MIN_YEAR, TIME_SEPARATOR, YMD_DIGITS};
use layout::Layout;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use text::{DELIMITER, TimeCut};

/// Error type for format configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Two digit years can't be expanded around this pivot.
    #[error(
        "Invalid two digit year pivot: {0} (must be {min}-{max})",
        min = MIN_YEAR,
        max = MAX_YEAR
    )]
    InvalidPivot(i32),
    /// The pattern can't be turned into a format.
    #[error("Invalid format pattern {pattern:?}: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
}

pub(crate) fn validate_pivot(pivot: i32) -> Result<i32, FormatError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&pivot) {
        Ok(pivot)
    } else {
        Err(FormatError::InvalidPivot(pivot))
    }
}

/// Prior knowledge that narrows the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// Years are written with two digits.
    TwoDigitYear,
    /// The year comes first.
    YearFirst,
    /// The year comes last.
    YearLast,
    /// Dates hold a year and month only.
    YearMonth,
}

/// Search settings. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriverConfig {
    pub hints: Vec<Hint>,
    /// Languages to look for month names in, all of them when empty.
    pub languages: Vec<Language>,
    /// Character between a date and its time of day, `None` to never strip a time.
    pub time_separator: Option<char>,
    /// Two digit years at or after this year's last two digits land in its century, earlier ones
    /// in the next.
    pub yy_pivot: i32,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            hints: Vec::new(),
            languages: Vec::new(),
            time_separator: Some(TIME_SEPARATOR),
            yy_pivot: clock::default_pivot(),
        }
    }
}

/// Derives a [`Format`] from sample dates. Holds no state between searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deriver {
    config: DeriverConfig,
}

impl Deriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `FormatError::InvalidPivot` if `yy_pivot` is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn with_config(config: DeriverConfig) -> Result<Self, FormatError> {
        validate_pivot(config.yy_pivot)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    #[must_use]
    pub fn hint(mut self, hint: Hint) -> Self {
        if !self.config.hints.contains(&hint) {
            self.config.hints.push(hint);
        }
        self
    }

    /// Adds a language to look for month names in. Once any is added only those are used.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        if !self.config.languages.contains(&language) {
            self.config.languages.push(language);
        }
        self
    }

    #[must_use]
    pub fn time_separator(mut self, separator: Option<char>) -> Self {
        self.config.time_separator = separator;
        self
    }

    /// # Errors
    /// Returns `FormatError::InvalidPivot` if `pivot` is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn yy_pivot(mut self, pivot: i32) -> Result<Self, FormatError> {
        self.config.yy_pivot = validate_pivot(pivot)?;
        Ok(self)
    }

    /// Finds the format of `samples`, which are all expected to be written the same way.
    ///
    /// Returns `None` when no sample pins the format down to a single layout.
    pub fn search<I>(&self, samples: I) -> Option<Format>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let mut search = Search::new(&self.config);
        for sample in samples {
            let sample = sample.to_string();
            if let Some(format) = search.sample(&sample) {
                debug!("derived format {format} from {sample:?}");
                return Some(format);
            }
        }
        debug!("no sample settled the format");
        None
    }
}

/// What one call to [`Deriver::search`] learns as it goes.
struct Search<'a> {
    config: &'a DeriverConfig,
    languages: Vec<Language>,
    short_year: bool,
    expected_digits: usize,
}

impl<'a> Search<'a> {
    fn new(config: &'a DeriverConfig) -> Self {
        let has = |hint| config.hints.contains(&hint);
        let shortened = |hint| if has(hint) { 2 } else { 0 };
        let short_year = has(Hint::TwoDigitYear);
        let expected_digits =
            YMD_DIGITS - shortened(Hint::TwoDigitYear) - shortened(Hint::YearMonth);
        let languages = if config.languages.is_empty() {
            Language::ALL.to_vec()
        } else {
            config.languages.clone()
        };
        Self {
            config,
            languages,
            short_year,
            expected_digits,
        }
    }

    fn in_range(&self, digits: usize) -> bool {
        digits + 2 > self.expected_digits && digits <= self.expected_digits
    }

    fn catalog(&self, digits: usize) -> impl Iterator<Item = Layout> + '_ {
        let has = |hint| self.config.hints.contains(&hint);
        let (first, last) = (has(Hint::YearFirst), has(Hint::YearLast));
        layout::catalog(digits, self.short_year)
            .iter()
            .copied()
            .filter(move |l| !first || layout::year_first(l))
            .filter(move |l| !last || layout::year_last(l))
    }

    /// The format if this sample fits exactly one layout.
    fn sample(&mut self, sample: &str) -> Option<Format> {
        let mut steps = Vec::new();
        let mut date = sample;

        if !text::is_digits(date) {
            let Some((head, cut)) = text::strip_time(date, self.config.time_separator) else {
                trace!("skipping {sample:?}: time of day can't be cut off");
                return None;
            };
            match cut {
                TimeCut::None => {}
                TimeCut::Once(c) => steps.push(Step::StripTimeOnce(c)),
                TimeCut::Loop => steps.push(Step::StripTimeLoop),
            }
            date = head;
        }

        let layouts = if text::is_digits(date) {
            self.digits_only(date)
        } else {
            let separated = text::normalize_separators(date);
            if separated != date {
                steps.push(Step::Separators);
            }
            let joined: String = separated.chars().filter(|c| *c != DELIMITER).collect();
            if text::is_digits(&joined) && self.in_range(joined.len()) {
                self.separated_digits(&separated)
            } else {
                self.text_month(&separated, &mut steps)
            }
        };

        let [found] = layouts[..] else {
            trace!("{sample:?} fits {} layouts", layouts.len());
            return None;
        };
        if layout::has_short_year(found) {
            steps.push(Step::ExpandYear {
                pivot: self.config.yy_pivot,
            });
        }
        Some(Format::new(found, steps))
    }

    fn digits_only(&self, digits: &str) -> Vec<Layout> {
        if !self.in_range(digits.len()) {
            return Vec::new();
        }
        let pivot = self.config.yy_pivot;
        self.catalog(self.expected_digits)
            .filter(|l| {
                layout::split_digits(l, digits)
                    .and_then(|values| layout::assemble(l, &values, pivot))
                    .is_some()
            })
            .collect()
    }

    fn separated_digits(&self, separated: &str) -> Vec<Layout> {
        let tokens = text::tokens(separated);
        self.fits_tokens(self.catalog(self.expected_digits), &tokens)
    }

    fn fits_tokens(
        &self,
        layouts: impl Iterator<Item = Layout>,
        tokens: &[&str],
    ) -> Vec<Layout> {
        let pivot = self.config.yy_pivot;
        layouts
            .filter(|l| {
                layout::split_tokens(l, tokens)
                    .and_then(|values| layout::assemble(l, &values, pivot))
                    .is_some()
            })
            .collect()
    }

    fn text_month(&mut self, separated: &str, steps: &mut Vec<Step>) -> Vec<Layout> {
        let standard = text::standardise(separated);
        let tokens = text::tokens(&standard);

        let mut used = Vec::new();
        let mut values = Vec::new();
        let mut month = None;
        for (position, token) in tokens.iter().enumerate() {
            if text::is_digits(token) {
                used.push(position);
                values.push(format!("{token:0>2}"));
                continue;
            }
            let matches: Vec<(Language, u8)> = self
                .languages
                .iter()
                .filter_map(|&lang| lang.month_number(token).map(|n| (lang, n)))
                .collect();
            if matches.is_empty() {
                continue;
            }
            if month.is_some() {
                trace!("{separated:?} names more than one month");
                return Vec::new();
            }
            month = Some((position, values.len(), matches));
            used.push(position);
            values.push(String::new());
        }

        let Some((position, index, matches)) = month else {
            trace!("no month name in {separated:?}");
            return Vec::new();
        };
        let &[(language, number)] = matches.as_slice() else {
            self.languages = matches.iter().map(|(lang, _)| *lang).collect();
            debug!("month name in {separated:?} is shared, languages now {:?}", self.languages);
            return Vec::new();
        };
        values[index] = format!("{number:02}");

        let digits: usize = values.iter().map(String::len).sum();
        let implied_short_year = digits == 6 && values.len() == 3;
        if implied_short_year {
            self.short_year = true;
        }

        let tokens: Vec<&str> = values.iter().map(String::as_str).collect();
        let mut layouts = self.fits_tokens(
            self.catalog(digits)
                .filter(|l| l.len() == tokens.len() && l[index].part == Part::Month),
            &tokens,
        );
        if layouts.len() > 1 && implied_short_year {
            layouts.retain(|l| layout::year_last(l));
        }

        steps.push(Step::TextMonth(MonthToken::At {
            language,
            position,
            used,
        }));
        layouts
    }
}
