//! Date-only value used by affiliation periods.
//!
//! # Responsibility
//! - Hold a calendar day with no time-of-day or offset component.
//! - Own the `YYYY-MM-DD` textual codec used by the user data document.
//!
//! # Invariants
//! - The encoded form is always exactly 10 characters, zero padded.
//! - `decode(encode(d)) == d` for every constructible value.
//! - Years are limited to `0..=9999` so the encoded width never changes.
//! - The default value is `0001-01-01`, used when a document omits a date.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_PATTERN_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern regex")
});

const MAX_YEAR: i32 = 9999;

/// Why a piece of text was rejected as a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormatErrorKind {
    /// Text is not shaped like `YYYY-MM-DD`.
    Pattern,
    /// Text is well shaped but names no real day (month 13, Feb 30, ...).
    InvalidDate,
}

/// Rejected date text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatError {
    pub text: String,
    pub kind: DateFormatErrorKind,
}

impl DateFormatError {
    fn new(text: impl Into<String>, kind: DateFormatErrorKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

impl Display for DateFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DateFormatErrorKind::Pattern => {
                write!(f, "date `{}` does not match YYYY-MM-DD", self.text)
            }
            DateFormatErrorKind::InvalidDate => {
                write!(f, "date `{}` is not a valid calendar date", self.text)
            }
        }
    }
}

impl Error for DateFormatError {}

/// A calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl Default for CalendarDate {
    fn default() -> Self {
        Self(NaiveDate::from_ymd_opt(1, 1, 1).expect("0001-01-01 is a valid date"))
    }
}

impl CalendarDate {
    /// Builds a date from calendar components.
    ///
    /// # Errors
    /// - `InvalidDate` when the components name no real day or the year falls
    ///   outside `0..=9999`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateFormatError> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(DateFormatError::new(
                format!("{year}-{month:02}-{day:02}"),
                DateFormatErrorKind::InvalidDate,
            ));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DateFormatError::new(
                    format!("{year:04}-{month:02}-{day:02}"),
                    DateFormatErrorKind::InvalidDate,
                )
            })
    }

    /// Formats the date as `YYYY-MM-DD`.
    pub fn encode(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    /// Parses `YYYY-MM-DD`, tolerating one layer of surrounding double quotes.
    ///
    /// # Errors
    /// - `Pattern` when the unquoted text is not four digits, two digits and
    ///   two digits separated by `-`.
    /// - `InvalidDate` when the digits name no real day.
    pub fn decode(text: &str) -> Result<Self, DateFormatError> {
        let unquoted = strip_one_quote_layer(text);
        if !DATE_PATTERN_RE.is_match(unquoted) {
            return Err(DateFormatError::new(text, DateFormatErrorKind::Pattern));
        }

        // Pattern guarantees ASCII digits at fixed offsets.
        let year = unquoted[0..4].parse::<i32>();
        let month = unquoted[5..7].parse::<u32>();
        let day = unquoted[8..10].parse::<u32>();
        match (year, month, day) {
            (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day)
                .map(Self)
                .ok_or_else(|| DateFormatError::new(text, DateFormatErrorKind::InvalidDate)),
            _ => Err(DateFormatError::new(text, DateFormatErrorKind::Pattern)),
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

fn strip_one_quote_layer(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CalendarDate {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CalendarDateVisitor)
    }
}

struct CalendarDateVisitor;

impl Visitor<'_> for CalendarDateVisitor {
    type Value = CalendarDate;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a date string formatted as YYYY-MM-DD")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        CalendarDate::decode(value).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, DateFormatErrorKind};

    #[test]
    fn encode_is_zero_padded() {
        let date = CalendarDate::from_ymd(7, 3, 9).expect("year 7 is representable");
        assert_eq!(date.encode(), "0007-03-09");
        assert_eq!(date.encode().len(), 10);
    }

    #[test]
    fn decode_strips_exactly_one_quote_layer() {
        let date = CalendarDate::decode("\"2020-06-15\"").expect("quoted date should decode");
        assert_eq!((date.year(), date.month(), date.day()), (2020, 6, 15));

        let err = CalendarDate::decode("\"\"2020-06-15\"\"").expect_err("double quoting");
        assert_eq!(err.kind, DateFormatErrorKind::Pattern);
    }

    #[test]
    fn decode_rejects_unbalanced_quote() {
        let err = CalendarDate::decode("\"2020-06-15").expect_err("unbalanced quote");
        assert_eq!(err.kind, DateFormatErrorKind::Pattern);
    }

    #[test]
    fn decode_rejects_bad_shapes_and_days() {
        for text in ["not-a-date", "2020-1-01", "20-01-2020", "2020-01-01T00:00:00Z", ""] {
            let err = CalendarDate::decode(text).expect_err("shape should be rejected");
            assert_eq!(err.kind, DateFormatErrorKind::Pattern, "input `{text}`");
        }
        for text in ["2020-13-01", "2020-02-30", "2021-02-29", "2020-00-10"] {
            let err = CalendarDate::decode(text).expect_err("day should be rejected");
            assert_eq!(err.kind, DateFormatErrorKind::InvalidDate, "input `{text}`");
        }
    }

    #[test]
    fn decode_rejects_non_ascii_digits() {
        let err = CalendarDate::decode("２０２０-01-01").expect_err("fullwidth digits");
        assert_eq!(err.kind, DateFormatErrorKind::Pattern);
    }

    #[test]
    fn from_ymd_rejects_years_outside_four_digits() {
        assert!(CalendarDate::from_ymd(10_000, 1, 1).is_err());
        assert!(CalendarDate::from_ymd(-1, 1, 1).is_err());
    }

    #[test]
    fn leap_day_roundtrips() {
        let date = CalendarDate::decode("2024-02-29").expect("leap day");
        assert_eq!(CalendarDate::decode(&date.encode()).expect("roundtrip"), date);
    }

    #[test]
    fn default_is_year_one() {
        assert_eq!(CalendarDate::default().encode(), "0001-01-01");
    }

    #[test]
    fn display_and_from_str_use_the_codec() {
        let date: CalendarDate = "1999-12-31".parse().expect("valid date");
        assert_eq!(date.to_string(), "1999-12-31");
    }
}
