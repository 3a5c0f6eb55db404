//! Month names recognised in date text, upper-cased with diacritics folded.

use crate::prelude::*;
use serde::{Deserialize, Serialize};

type MonthNames = [&'static str; 12];

const EN_ABBREVIATED: MonthNames = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const EN_FULL: MonthNames = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

const DE_ABBREVIATED: MonthNames = [
    "JAN", "FEB", "MRZ", "APR", "MAI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEZ",
];
const DE_FULL: MonthNames = [
    "JANUAR",
    "FEBRUAR",
    "MARZ",
    "APRIL",
    "MAI",
    "JUNI",
    "JULI",
    "AUGUST",
    "SEPTEMBER",
    "OKTOBER",
    "NOVEMBER",
    "DEZEMBER",
];

const ES_ABBREVIATED: MonthNames = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];
const ES_FULL: MonthNames = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

const FR_ABBREVIATED: MonthNames = [
    "JANV", "FEVR", "MARS", "AVR", "MAI", "JUIN", "JUIL", "AOUT", "SEPT", "OCT", "NOV", "DEC",
];
const FR_FULL: MonthNames = [
    "JANVIER",
    "FEVRIER",
    "MARS",
    "AVRIL",
    "MAI",
    "JUIN",
    "JUILLET",
    "AOUT",
    "SEPTEMBRE",
    "OCTOBRE",
    "NOVEMBRE",
    "DECEMBRE",
];

/// A language whose month names can appear in date text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[display(fmt = "en")]
    En,
    #[display(fmt = "de")]
    De,
    #[display(fmt = "es")]
    Es,
    #[display(fmt = "fr")]
    Fr,
}

impl Language {
    /// Every supported language, in search order.
    pub const ALL: [Self; 4] = [Self::En, Self::De, Self::Es, Self::Fr];

    /// Short month names, `JAN` through `DEC` in English.
    pub const fn abbreviated(self) -> &'static MonthNames {
        match self {
            Self::En => &EN_ABBREVIATED,
            Self::De => &DE_ABBREVIATED,
            Self::Es => &ES_ABBREVIATED,
            Self::Fr => &FR_ABBREVIATED,
        }
    }

    /// Full month names.
    pub const fn full(self) -> &'static MonthNames {
        match self {
            Self::En => &EN_FULL,
            Self::De => &DE_FULL,
            Self::Es => &ES_FULL,
            Self::Fr => &FR_FULL,
        }
    }

    /// Month number for a standardised token, either form.
    #[allow(clippy::cast_possible_truncation)]
    pub fn month_number(self, token: &str) -> Option<u8> {
        self.abbreviated()
            .iter()
            .position(|name| *name == token)
            .or_else(|| self.full().iter().position(|name| *name == token))
            .map(|index| index as u8 + 1)
    }
}
