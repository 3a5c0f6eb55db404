//! String preparation shared by format inference and format replay.

use crate::consts::YMD_DIGITS;

/// Delimiter that all recognised separators are normalised to.
pub(crate) const DELIMITER: char = '\t';

const SEPARATORS: [char; 4] = [' ', '-', '/', '.'];

pub(crate) fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Non-empty and nothing but ASCII digits.
pub(crate) fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Text before `separator`, provided it is the only one among the digits and what precedes it
/// looks like a whole date: at least eight characters holding at most eight digits.
pub(crate) fn up_to_char(text: &str, separator: char) -> Option<&str> {
    let occurrences = text.chars().filter(|c| *c == separator).count();
    if occurrences != 1 {
        return None;
    }
    let (prefix, _) = text.split_once(separator)?;
    (prefix.chars().count() >= YMD_DIGITS && digit_count(prefix) <= YMD_DIGITS).then_some(prefix)
}

/// Drops trailing space separated words until at most eight digits remain.
pub(crate) fn strip_trailing_words(text: &str) -> &str {
    let mut text = text;
    while digit_count(text) > YMD_DIGITS {
        match text.rsplit_once(' ') {
            Some((head, _)) => text = head,
            None => break,
        }
    }
    text
}

/// How the time of day was cut off a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeCut {
    /// Nothing to cut.
    None,
    /// Truncated at a single occurrence of the character.
    Once(char),
    /// Trailing words dropped.
    Loop,
}

/// Removes a time of day from a sample holding more than eight digits.
///
/// Returns `None` when a time seems present but can't be cut cleanly; such a sample is skipped.
pub(crate) fn strip_time(text: &str, separator: Option<char>) -> Option<(&str, TimeCut)> {
    let Some(separator) = separator else {
        return Some((text, TimeCut::None));
    };
    if digit_count(text) <= YMD_DIGITS {
        return Some((text, TimeCut::None));
    }

    let spaces = text.matches(' ').count();
    if spaces == 0 && text.matches(separator).count() == 1 {
        up_to_char(text, separator).map(|head| (head, TimeCut::Once(separator)))
    } else if spaces == 1 {
        up_to_char(text, ' ').map(|head| (head, TimeCut::Once(' ')))
    } else if spaces > 1 {
        Some((strip_trailing_words(text), TimeCut::Loop))
    } else {
        Some((text, TimeCut::None))
    }
}

/// Replaces each space, `-`, `/` and `.` with [`DELIMITER`] and trims delimiters from both ends.
pub(crate) fn normalize_separators(text: &str) -> String {
    text.chars()
        .map(|c| if SEPARATORS.contains(&c) { DELIMITER } else { c })
        .collect::<String>()
        .trim_matches(DELIMITER)
        .to_owned()
}

/// Upper-cases and folds the accented letters used in month names.
pub(crate) fn standardise(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| match c {
            'Ä' | 'À' | 'Â' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Û' | 'Ü' | 'Ù' => 'U',
            'Ô' | 'Ö' => 'O',
            'Î' | 'Ï' => 'I',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Splits on [`DELIMITER`] when present, otherwise wherever digits meet non-digits.
/// Punctuation around a token is trimmed, so `24,` reads as `24`, and empty tokens are dropped.
pub(crate) fn tokens(text: &str) -> Vec<&str> {
    let raw: Vec<&str> = if text.contains(DELIMITER) {
        text.split(DELIMITER).collect()
    } else {
        split_digit_runs(text)
    };
    raw.into_iter()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

fn split_digit_runs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut last_digit = None;
    for (i, c) in text.char_indices() {
        let digit = c.is_ascii_digit();
        if last_digit.is_some_and(|last| last != digit) {
            out.push(&text[start..i]);
            start = i;
        }
        last_digit = Some(digit);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_to_char() {
        let iso = "2021-03-27T05:50:06.7199222-04:00";
        assert_eq!(up_to_char(iso, 'T'), Some("2021-03-27"));
        assert_eq!(up_to_char("03/28/2021 05:50:06", ' '), Some("03/28/2021"));
        assert_eq!(up_to_char("20210327T0550", 'T'), Some("20210327"));
        assert_eq!(up_to_char("2021327T0550", 'T'), None, "prefix too short");
        assert_eq!(up_to_char("202103271T0550", 'T'), None, "nine digits before the cut");
        assert_eq!(up_to_char("2021-03-27", 'T'), None, "nothing to cut at");
        assert_eq!(up_to_char("2021-03-27T05T50", 'T'), None, "cut is ambiguous");
    }

    #[test]
    fn test_strip_trailing_words() {
        assert_eq!(strip_trailing_words("11/25/2020 7:00PM Europe/Berlin"), "11/25/2020");
        assert_eq!(strip_trailing_words("Monday, 29 March 2021 05:50 AM"), "Monday, 29 March 2021");
        assert_eq!(strip_trailing_words("20210327"), "20210327");
        assert_eq!(strip_trailing_words("202103271234"), "202103271234", "no space to cut at");
    }

    #[test]
    fn test_strip_time() {
        assert_eq!(strip_time("20210327", Some('T')), Some(("20210327", TimeCut::None)));
        assert_eq!(
            strip_time("2021-03-27T05:50:06", Some('T')),
            Some(("2021-03-27", TimeCut::Once('T')))
        );
        assert_eq!(
            strip_time("03/28/2021 05:50:06", Some('T')),
            Some(("03/28/2021", TimeCut::Once(' ')))
        );
        assert_eq!(
            strip_time("Mon, 25 Jan 2021 05:50:06 GMT", Some('T')),
            Some(("Mon, 25 Jan 2021", TimeCut::Loop))
        );
        assert_eq!(strip_time("1/2/21 05:50:06", Some('T')), None);
        assert_eq!(
            strip_time("2021-03-27T05:50:06", None),
            Some(("2021-03-27T05:50:06", TimeCut::None))
        );
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators("20-mar-20"), "20\tmar\t20");
        assert_eq!(normalize_separators("25.11.2020"), "25\t11\t2020");
        assert_eq!(normalize_separators(" 2020/11/25 "), "2020\t11\t25");
        assert_eq!(normalize_separators("20201125"), "20201125");
    }

    #[test]
    fn test_standardise() {
        assert_eq!(standardise("März"), "MARZ");
        assert_eq!(standardise("févr"), "FEVR");
        assert_eq!(standardise("août"), "AOUT");
        assert_eq!(standardise("Décembre"), "DECEMBRE");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("29MAR2020"), ["29", "MAR", "2020"]);
        assert_eq!(tokens("MONDAY,\t29\tMARCH\t\t2021"), ["MONDAY", "29", "MARCH", "2021"]);
        assert_eq!(tokens("MAY24,2021"), ["MAY", "24", "2021"]);
        assert_eq!(tokens("2020"), ["2020"]);
        assert!(tokens("").is_empty());
    }
}
