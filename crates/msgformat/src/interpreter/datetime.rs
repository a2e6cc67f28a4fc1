//! Built-in date and time formatting.
//!
//! Field order and the 12/24-hour clock follow the locale; month and weekday
//! names are English. Custom styles accept a `strftime` string (anything
//! containing `%`), a CLDR skeleton made only of field letters (`yMMMd`,
//! `EEEEjm`), or a CLDR pattern with literal text (`dd.MM.yyyy`).

use std::fmt::Write;

use chrono::NaiveDateTime;
use log::debug;

use crate::interpreter::services::{
    DateTimeFormatter, DateTimePart, DateTimeStyle, language_of, region_of,
};

/// The default [`DateTimeFormatter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDateTimeFormatter;

impl DateTimeFormatter for BasicDateTimeFormatter {
    fn format_date_time(
        &self,
        value: NaiveDateTime,
        locale: &str,
        part: DateTimePart,
        style: &DateTimeStyle,
    ) -> String {
        let conventions = Conventions::for_locale(locale);
        let pattern = match style {
            DateTimeStyle::Custom(custom) if custom.contains('%') => custom.clone(),
            DateTimeStyle::Custom(custom) if is_skeleton(custom) => {
                skeleton_to_strftime(custom, conventions)
            }
            DateTimeStyle::Custom(custom) => pattern_to_strftime(custom),
            builtin => match part {
                DateTimePart::Date => date_pattern(builtin, conventions.order).to_string(),
                DateTimePart::Time => time_pattern(builtin, conventions.twelve_hour).to_string(),
            },
        };
        render(value, &pattern).unwrap_or_else(|| {
            debug!("invalid date pattern '{pattern}', using medium style");
            let fallback = match part {
                DateTimePart::Date => date_pattern(&DateTimeStyle::Medium, conventions.order),
                DateTimePart::Time => time_pattern(&DateTimeStyle::Medium, conventions.twelve_hour),
            };
            render(value, fallback).unwrap_or_default()
        })
    }
}

/// Field order of a numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

#[derive(Debug, Clone, Copy)]
struct Conventions {
    order: DateOrder,
    twelve_hour: bool,
}

impl Conventions {
    fn for_locale(locale: &str) -> Self {
        let language = language_of(locale);
        let region = region_of(locale);
        let order = match (language, region) {
            ("en", None | Some("US" | "PH")) => DateOrder::MonthDayYear,
            ("ja" | "zh" | "ko" | "hu" | "lt", _) => DateOrder::YearMonthDay,
            _ => DateOrder::DayMonthYear,
        };
        let twelve_hour = matches!(
            (language, region),
            ("en", None | Some("US" | "CA" | "AU" | "NZ" | "PH" | "IN")) | ("ko" | "hi", _)
        );
        Self { order, twelve_hour }
    }
}

fn date_pattern(style: &DateTimeStyle, order: DateOrder) -> &'static str {
    match (style, order) {
        (DateTimeStyle::Short, DateOrder::MonthDayYear) => "%-m/%-d/%y",
        (DateTimeStyle::Short, DateOrder::DayMonthYear) => "%d/%m/%Y",
        (DateTimeStyle::Short, DateOrder::YearMonthDay) => "%Y/%m/%d",
        (DateTimeStyle::Long, DateOrder::MonthDayYear) => "%B %-d, %Y",
        (DateTimeStyle::Long, DateOrder::DayMonthYear) => "%-d %B %Y",
        (DateTimeStyle::Long, DateOrder::YearMonthDay) => "%Y %B %-d",
        (DateTimeStyle::Full, DateOrder::MonthDayYear) => "%A, %B %-d, %Y",
        (DateTimeStyle::Full, DateOrder::DayMonthYear) => "%A %-d %B %Y",
        (DateTimeStyle::Full, DateOrder::YearMonthDay) => "%Y %B %-d, %A",
        (_, DateOrder::MonthDayYear) => "%b %-d, %Y",
        (_, DateOrder::DayMonthYear) => "%-d %b %Y",
        (_, DateOrder::YearMonthDay) => "%Y %b %-d",
    }
}

fn time_pattern(style: &DateTimeStyle, twelve_hour: bool) -> &'static str {
    match (style, twelve_hour) {
        (DateTimeStyle::Short, true) => "%-I:%M %p",
        (DateTimeStyle::Short, false) => "%H:%M",
        (_, true) => "%-I:%M:%S %p",
        (_, false) => "%H:%M:%S",
    }
}

/// Format with a `strftime` pattern, or `None` if the pattern is invalid.
fn render(value: NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(pattern)).ok()?;
    Some(out)
}

const SKELETON_FIELDS: &str = "GyMLdEcHhjKkmsa";

fn is_skeleton(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| SKELETON_FIELDS.contains(c))
}

/// Split a string into runs of the same character.
fn runs(text: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        match runs.last_mut() {
            Some((last, count)) if *last == c => *count += 1,
            _ => runs.push((c, 1)),
        }
    }
    runs
}

/// Arrange the fields a skeleton asks for in the locale's order.
fn skeleton_to_strftime(skeleton: &str, conventions: Conventions) -> String {
    let mut year = None;
    let mut month = None;
    let mut day = false;
    let mut weekday = None;
    let mut hour = None;
    let mut minute = false;
    let mut second = false;
    for (field, width) in runs(skeleton) {
        match field {
            'y' => year = Some(if width == 2 { "%y" } else { "%Y" }),
            'M' | 'L' => month = Some(width),
            'd' => day = true,
            'E' | 'c' => weekday = Some(if width >= 4 { "%A" } else { "%a" }),
            'h' | 'K' => hour = Some(true),
            'H' | 'k' => hour = Some(false),
            'j' => hour = Some(conventions.twelve_hour),
            'm' => minute = true,
            's' => second = true,
            _ => {}
        }
    }

    let date = match month {
        Some(width) if width >= 3 => {
            let name = if width == 3 { "%b" } else { "%B" };
            let day = day.then_some("%-d");
            match conventions.order {
                DateOrder::MonthDayYear => {
                    let month_day = [Some(name), day].into_iter().flatten().collect::<Vec<_>>();
                    let mut text = month_day.join(" ");
                    if let Some(year) = year {
                        text.push_str(if day.is_some() { ", " } else { " " });
                        text.push_str(year);
                    }
                    text
                }
                DateOrder::DayMonthYear => join_fields(&[day, Some(name), year], " "),
                DateOrder::YearMonthDay => join_fields(&[year, Some(name), day], " "),
            }
        }
        _ => {
            let month = month.map(|width| if width == 2 { "%m" } else { "%-m" });
            let day = day.then_some("%-d");
            match conventions.order {
                DateOrder::MonthDayYear => join_fields(&[month, day, year], "/"),
                DateOrder::DayMonthYear => join_fields(&[day, month, year], "/"),
                DateOrder::YearMonthDay => join_fields(&[year, month, day], "/"),
            }
        }
    };
    let date = match (weekday, date.is_empty()) {
        (Some(weekday), true) => weekday.to_string(),
        (Some(weekday), false) => format!("{weekday}, {date}"),
        (None, _) => date,
    };

    let clock = match hour {
        Some(true) => Some("%-I"),
        Some(false) => Some("%H"),
        None => None,
    };
    let mut time = join_fields(
        &[clock, minute.then_some("%M"), second.then_some("%S")],
        ":",
    );
    if hour == Some(true) {
        time.push_str(" %p");
    }

    join_fields(
        &[
            (!date.is_empty()).then_some(date.as_str()),
            (!time.is_empty()).then_some(time.as_str()),
        ],
        ", ",
    )
}

fn join_fields(fields: &[Option<&str>], separator: &str) -> String {
    fields
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Translate a CLDR pattern to `strftime`. Quoted text is literal.
fn pattern_to_strftime(pattern: &str) -> String {
    let mut out = String::new();
    let mut quoted = false;
    for (c, width) in runs(pattern) {
        if c == '\'' {
            // '' is an escaped quote; a lone quote toggles literal mode.
            out.push_str(&"'".repeat(width.div_euclid(2)));
            if width % 2 == 1 {
                quoted = !quoted;
            }
            continue;
        }
        if quoted || !c.is_ascii_alphabetic() {
            let literal = if c == '%' { "%%".to_string() } else { c.to_string() };
            out.push_str(&literal.repeat(width));
            continue;
        }
        let field = match (c, width) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M' | 'L', 1) => "%-m",
            ('M' | 'L', 2) => "%m",
            ('M' | 'L', 3) => "%b",
            ('M' | 'L', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('E' | 'c', 1..=3) => "%a",
            ('E' | 'c', _) => "%A",
            ('H' | 'k', 1) => "%-H",
            ('H' | 'k', _) => "%H",
            ('h' | 'K', 1) => "%-I",
            ('h' | 'K', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('a', _) => "%p",
            _ => {
                out.push_str(&c.to_string().repeat(width));
                continue;
            }
        };
        out.push_str(field);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(15, 4, 5))
            .unwrap()
    }

    fn fmt(locale: &str, part: DateTimePart, style: DateTimeStyle) -> String {
        BasicDateTimeFormatter.format_date_time(sample(), locale, part, &style)
    }

    #[test]
    fn english_dates() {
        assert_eq!(fmt("en-US", DateTimePart::Date, DateTimeStyle::Short), "1/15/24");
        assert_eq!(fmt("en-US", DateTimePart::Date, DateTimeStyle::Medium), "Jan 15, 2024");
        assert_eq!(fmt("en-US", DateTimePart::Date, DateTimeStyle::Long), "January 15, 2024");
        assert_eq!(
            fmt("en-US", DateTimePart::Date, DateTimeStyle::Full),
            "Monday, January 15, 2024"
        );
    }

    #[test]
    fn locale_date_order() {
        assert_eq!(fmt("en-GB", DateTimePart::Date, DateTimeStyle::Short), "15/01/2024");
        assert_eq!(fmt("de", DateTimePart::Date, DateTimeStyle::Medium), "15 Jan 2024");
        assert_eq!(fmt("ja", DateTimePart::Date, DateTimeStyle::Short), "2024/01/15");
    }

    #[test]
    fn clock_follows_locale() {
        assert_eq!(fmt("en", DateTimePart::Time, DateTimeStyle::Short), "3:04 PM");
        assert_eq!(fmt("en", DateTimePart::Time, DateTimeStyle::Medium), "3:04:05 PM");
        assert_eq!(fmt("fr", DateTimePart::Time, DateTimeStyle::Short), "15:04");
    }

    #[test]
    fn skeletons_use_locale_order() {
        let style = DateTimeStyle::Custom("yMMMd".into());
        assert_eq!(fmt("en", DateTimePart::Date, style.clone()), "Jan 15, 2024");
        assert_eq!(fmt("de", DateTimePart::Date, style), "15 Jan 2024");
        assert_eq!(
            fmt("en", DateTimePart::Date, DateTimeStyle::Custom("yMd".into())),
            "1/15/2024"
        );
        assert_eq!(
            fmt("en", DateTimePart::Time, DateTimeStyle::Custom("jm".into())),
            "3:04 PM"
        );
        assert_eq!(
            fmt("en", DateTimePart::Date, DateTimeStyle::Custom("EEEEMMMMd".into())),
            "Monday, January 15"
        );
    }

    #[test]
    fn patterns_and_strftime() {
        assert_eq!(
            fmt("de", DateTimePart::Date, DateTimeStyle::Custom("dd.MM.yyyy".into())),
            "15.01.2024"
        );
        assert_eq!(
            fmt("en", DateTimePart::Date, DateTimeStyle::Custom("h 'o''clock'".into())),
            "3 o'clock"
        );
        assert_eq!(
            fmt("en", DateTimePart::Date, DateTimeStyle::Custom("%Y-%m-%d".into())),
            "2024-01-15"
        );
    }

    #[test]
    fn invalid_strftime_falls_back_to_medium() {
        assert_eq!(
            fmt("en", DateTimePart::Date, DateTimeStyle::Custom("%Q".into())),
            "Jan 15, 2024"
        );
    }
}
