//! A derived or hand-written date format and its replay on new input.

use super::layout::{self, Layout};
use super::months::Language;
use super::text::{self, DELIMITER};
use super::{FormatError, validate_pivot};
use crate::clock;
use crate::consts::YMD_DIGITS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which date part a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Year,
    Month,
    Day,
}

/// A fixed-width numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub part: Part,
    pub width: u8,
}

impl Field {
    pub const fn new(part: Part, width: u8) -> Self {
        Self { part, width }
    }

    /// A year written with two digits.
    pub const fn is_short_year(self) -> bool {
        matches!(self.part, Part::Year) && self.width == 2
    }
}

/// Where the month name sits in the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthToken {
    /// Token `position` is a month name in `language`. Only the tokens in `used`, in order,
    /// make up the date.
    At {
        language: Language,
        position: usize,
        used: Vec<usize>,
    },
    /// The first token naming a month in any of `languages`; every numeric token is kept.
    Anywhere { languages: Vec<Language> },
}

impl MonthToken {
    /// Replaces the month name with its number and drops the tokens that aren't part of the
    /// date. The result is delimited.
    fn resolve(&self, sample: &str) -> Option<String> {
        let standard = text::standardise(sample);
        let tokens = text::tokens(&standard);

        let kept: Vec<String> = match self {
            Self::At {
                language,
                position,
                used,
            } => {
                let number = language.month_number(tokens.get(*position)?)?;
                used.iter()
                    .map(|&i| {
                        if i == *position {
                            Some(format!("{number:02}"))
                        } else {
                            tokens.get(i).filter(|t| text::is_digits(t)).map(|t| (*t).to_owned())
                        }
                    })
                    .collect::<Option<_>>()?
            }
            Self::Anywhere { languages } => {
                let mut found = false;
                let mut kept = Vec::with_capacity(tokens.len());
                for token in tokens {
                    if text::is_digits(token) {
                        kept.push(token.to_owned());
                    } else if !found {
                        if let Some(number) =
                            languages.iter().find_map(|lang| lang.month_number(token))
                        {
                            kept.push(format!("{number:02}"));
                            found = true;
                        }
                    }
                }
                if !found {
                    return None;
                }
                kept
            }
        };

        Some(kept.join(&DELIMITER.to_string()))
    }
}

/// One preparation step applied to a sample before its fields are read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Cut a time of day off at the single occurrence of this character.
    StripTimeOnce(char),
    /// Drop trailing space separated words until at most eight digits remain.
    StripTimeLoop,
    /// Space, `-`, `/` and `.` separate the fields.
    Separators,
    /// The month is written as a name.
    TextMonth(MonthToken),
    /// Two digit years are expanded around this pivot.
    ExpandYear { pivot: i32 },
}

/// A date format: the fields in order plus the steps that reduce a sample to them.
///
/// Produced by [`Deriver::search`](super::Deriver::search) or written by hand with
/// [`Format::from_pattern`], and applied with [`Format::parts_from_str`]. Deserializing checks
/// the fields and pivot the same way [`Format::from_pattern`] does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFormat")]
pub struct Format {
    fields: Vec<Field>,
    steps: Vec<Step>,
}

#[derive(Deserialize)]
struct RawFormat {
    fields: Vec<Field>,
    steps: Vec<Step>,
}

impl TryFrom<RawFormat> for Format {
    type Error = FormatError;

    fn try_from(raw: RawFormat) -> Result<Self, Self::Error> {
        let format = Self {
            fields: raw.fields,
            steps: raw.steps,
        };
        format.validate()?;
        Ok(format)
    }
}

impl Format {
    pub(crate) fn new(layout: Layout, steps: Vec<Step>) -> Self {
        Self {
            fields: layout.to_vec(),
            steps,
        }
    }

    /// Builds a format from pattern letters: `Y` four digit year, `y` two digit year, `m` month
    /// number, `M` month name, `d` day, and `-` when the fields are separated. `yy_pivot` only
    /// matters with `y` and defaults to 80 years before the current one.
    ///
    /// ```
    /// use undated::infer::Format;
    ///
    /// let format = Format::from_pattern("d-M-y", Some(1950)).unwrap();
    /// assert_eq!(format.parts_from_str("20-mar-20"), Some((2020, 3, 20)));
    /// ```
    ///
    /// # Errors
    /// Returns `FormatError::InvalidPattern` for unknown letters, repeated parts, or a pattern
    /// without a year, and `FormatError::InvalidPivot` for an unusable pivot.
    pub fn from_pattern(pattern: &str, yy_pivot: Option<i32>) -> Result<Self, FormatError> {
        let invalid = |reason| FormatError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason,
        };

        let mut fields = Vec::with_capacity(3);
        let mut separated = false;
        let mut text_month = false;
        for c in pattern.chars() {
            let field = match c {
                'Y' => Field::new(Part::Year, 4),
                'y' => Field::new(Part::Year, 2),
                'm' => Field::new(Part::Month, 2),
                'M' => {
                    text_month = true;
                    Field::new(Part::Month, 2)
                }
                'd' => Field::new(Part::Day, 2),
                '-' => {
                    separated = true;
                    continue;
                }
                _ => return Err(invalid("unknown letter")),
            };
            if fields.iter().any(|f: &Field| f.part == field.part) {
                return Err(invalid("part repeated"));
            }
            fields.push(field);
        }
        if !fields.iter().any(|f| f.part == Part::Year) {
            return Err(invalid("no year"));
        }

        let mut steps = Vec::new();
        if separated {
            steps.push(Step::Separators);
        }
        if text_month {
            steps.push(Step::TextMonth(MonthToken::Anywhere {
                languages: Language::ALL.to_vec(),
            }));
        }
        if fields.iter().any(|f| f.is_short_year()) {
            let pivot = match yy_pivot {
                Some(pivot) => validate_pivot(pivot)?,
                None => clock::default_pivot(),
            };
            steps.push(Step::ExpandYear { pivot });
        }

        Ok(Self { fields, steps })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Pivot for two digit years.
    pub fn pivot(&self) -> i32 {
        self.steps
            .iter()
            .find_map(|step| match step {
                Step::ExpandYear { pivot } => Some(*pivot),
                _ => None,
            })
            .unwrap_or_else(clock::default_pivot)
    }

    /// Reads year, month and day from a sample written in this format.
    ///
    /// Returns `None` when the sample doesn't fit the format or isn't a valid date.
    pub fn parts_from_str(&self, sample: &str) -> Option<(i32, u8, u8)> {
        let prepared = self.prepare(sample)?;

        let values = if prepared.contains(DELIMITER) {
            let tokens = text::tokens(&prepared);
            if tokens.len() == self.fields.len() {
                layout::split_tokens(&self.fields, &tokens)?
            } else {
                layout::split_digits(&self.fields, &digits_of(&prepared))?
            }
        } else {
            layout::split_digits(&self.fields, &digits_of(&prepared))?
        };

        layout::assemble(&self.fields, &values, self.pivot())
    }

    /// Reads year, month and day from an integer whose digits follow this format, e.g.
    /// `1022022` as `dmY`. Only the leftmost field may lose its leading zero.
    pub fn parts_from_packed(&self, packed: i64) -> Option<(i32, u8, u8)> {
        if packed < 0 {
            return None;
        }
        let values = layout::split_digits(&self.fields, &packed.to_string())?;
        layout::assemble(&self.fields, &values, self.pivot())
    }

    fn prepare(&self, sample: &str) -> Option<String> {
        let mut prepared = sample.to_owned();
        for step in &self.steps {
            prepared = match step {
                Step::StripTimeOnce(separator) => {
                    if text::digit_count(&prepared) > YMD_DIGITS {
                        text::up_to_char(&prepared, *separator)?.to_owned()
                    } else {
                        prepared
                    }
                }
                Step::StripTimeLoop => text::strip_trailing_words(&prepared).to_owned(),
                Step::Separators => text::normalize_separators(&prepared),
                Step::TextMonth(token) => token.resolve(&prepared)?,
                Step::ExpandYear { .. } => prepared,
            };
        }
        Some(prepared)
    }

    fn validate(&self) -> Result<(), FormatError> {
        let invalid = |reason| FormatError::InvalidPattern {
            pattern: self.to_string(),
            reason,
        };

        for (i, field) in self.fields.iter().enumerate() {
            let width_ok = match field.part {
                Part::Year => field.width == 2 || field.width == 4,
                Part::Month | Part::Day => (1..=2).contains(&field.width),
            };
            if !width_ok {
                return Err(invalid("unusable field width"));
            }
            if self.fields[..i].iter().any(|f| f.part == field.part) {
                return Err(invalid("part repeated"));
            }
        }
        if !self.fields.iter().any(|f| f.part == Part::Year) {
            return Err(invalid("no year"));
        }
        for step in &self.steps {
            if let Step::ExpandYear { pivot } = step {
                validate_pivot(*pivot)?;
            }
        }
        Ok(())
    }

    fn has_step(&self, wanted: impl Fn(&Step) -> bool) -> bool {
        self.steps.iter().any(wanted)
    }
}

fn digits_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pattern(s, None)
    }
}

/// Writes the pattern letters, e.g. `d-M-y`.
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separated = self.has_step(|s| matches!(s, Step::Separators));
        let text_month = self.has_step(|s| matches!(s, Step::TextMonth(_)));
        for (i, field) in self.fields.iter().enumerate() {
            if separated && i > 0 {
                f.write_str("-")?;
            }
            let letter = match field.part {
                Part::Year if field.is_short_year() => 'y',
                Part::Year => 'Y',
                Part::Month if text_month => 'M',
                Part::Month => 'm',
                Part::Day => 'd',
            };
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}
