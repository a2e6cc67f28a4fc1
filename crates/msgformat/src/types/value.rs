use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::Number;

/// Accepted textual forms for date-time strings passed as arguments.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A runtime value bound to a message argument.
///
/// The `Value` enum provides a dynamic type system for message arguments,
/// allowing numbers, strings and date-times to be passed interchangeably.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use msgformat::Value;
///
/// // Integers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Alice".into();
///
/// // Dates become Value::DateTime at midnight
/// let day: Value = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().into();
/// assert_eq!(day.to_string(), "2024-01-15 00:00:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A calendar date and wall-clock time without a time zone.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of this value.
    ///
    /// Strings holding a decimal literal are accepted so that arguments read
    /// from text sources (CLI flags, JSON strings) still select plural forms.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(Number::Integer(*n)),
            Value::Float(f) => Some(Number::Decimal(*f)),
            Value::String(s) => s.trim().parse().ok(),
            Value::DateTime(_) => None,
        }
    }

    /// Date-time view of this value.
    ///
    /// Integers are read as milliseconds since the Unix epoch (UTC), strings
    /// as ISO-8601 date-times or plain dates.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Number(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc())
            }
            Value::String(s) => parse_date_time(s.trim()),
            Value::Float(_) => None,
        }
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::DateTime(date.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Value::DateTime(dt.naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_have_a_number_view() {
        assert_eq!(Value::from("12").as_number(), Some(Number::Integer(12)));
        assert_eq!(Value::from(" 1.5 ").as_number(), Some(Number::Decimal(1.5)));
        assert_eq!(Value::from("twelve").as_number(), None);
    }

    #[test]
    fn dates_parse_from_iso_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(
            Value::from("2024-03-09T14:05:00").as_date_time(),
            Some(expected)
        );
        assert_eq!(
            Value::from("2024-03-09").as_date_time(),
            NaiveDate::from_ymd_opt(2024, 3, 9).map(|d| d.and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn integers_are_epoch_milliseconds() {
        let dt = Value::from(0).as_date_time().unwrap();
        assert_eq!(dt.to_string(), "1970-01-01 00:00:00");
    }
}
