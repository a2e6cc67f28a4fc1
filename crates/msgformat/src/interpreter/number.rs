//! Built-in number formatting.
//!
//! A small, data-free formatter covering the styles message patterns can
//! name. Separators follow the language of the locale; spellout and ordinal
//! words are English only and fall back to plain decimals elsewhere. Plug a
//! full CLDR formatter in through [`LocaleServices`] when exact output
//! matters.
//!
//! [`LocaleServices`]: crate::interpreter::LocaleServices

use log::debug;

use crate::interpreter::services::{NumberFormatter, NumberStyle, language_of, region_of};
use crate::types::Number;

/// The default [`NumberFormatter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNumberFormatter;

impl NumberFormatter for BasicNumberFormatter {
    fn format_number(&self, n: Number, locale: &str, style: &NumberStyle) -> String {
        match style {
            NumberStyle::Default => format_decimal(n, locale, &DecimalPattern::DEFAULT),
            NumberStyle::Integer => format_decimal(n, locale, &DecimalPattern::INTEGER),
            NumberStyle::Percent => format_decimal(n, locale, &DecimalPattern::PERCENT),
            NumberStyle::Currency => format_currency(n, locale),
            NumberStyle::Spellout => match language_of(locale) {
                "en" => spell_out_english(n),
                lang => {
                    debug!("no spellout rules for '{lang}', formatting as decimal");
                    format_decimal(n, locale, &DecimalPattern::DEFAULT)
                }
            },
            NumberStyle::Ordinal => match (language_of(locale), n.as_integer()) {
                ("en", Some(i)) => format!(
                    "{}{}",
                    format_decimal(Number::Integer(i), locale, &DecimalPattern::DEFAULT),
                    english_ordinal_suffix(i)
                ),
                _ => format_decimal(n, locale, &DecimalPattern::DEFAULT),
            },
            NumberStyle::Duration => format_duration(n),
            NumberStyle::Custom(pattern) => match DecimalPattern::parse(pattern) {
                Some(parsed) => format_decimal(n, locale, &parsed),
                None => {
                    debug!("unsupported number pattern '{pattern}', using default style");
                    format_decimal(n, locale, &DecimalPattern::DEFAULT)
                }
            },
        }
    }
}

// =========================================================================
// Decimal patterns
// =========================================================================

/// Fraction, grouping and scaling rules for one rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DecimalPattern {
    min_fraction: usize,
    max_fraction: usize,
    grouping: bool,
    percent: bool,
}

impl DecimalPattern {
    const DEFAULT: Self = Self {
        min_fraction: 0,
        max_fraction: 3,
        grouping: true,
        percent: false,
    };
    const INTEGER: Self = Self {
        min_fraction: 0,
        max_fraction: 0,
        grouping: true,
        percent: false,
    };
    const PERCENT: Self = Self {
        min_fraction: 0,
        max_fraction: 0,
        grouping: true,
        percent: true,
    };

    /// Read a decimal pattern such as `#,##0.00` or `0.#%`.
    fn parse(pattern: &str) -> Option<Self> {
        if pattern.is_empty() || !pattern.chars().all(|c| "#0,.%".contains(c)) {
            return None;
        }
        let (integer, fraction) = pattern
            .trim_end_matches('%')
            .split_once('.')
            .unwrap_or((pattern.trim_end_matches('%'), ""));
        Some(Self {
            min_fraction: fraction.matches('0').count(),
            max_fraction: fraction.matches(['0', '#']).count(),
            grouping: integer.contains(','),
            percent: pattern.ends_with('%'),
        })
    }
}

/// Decimal and grouping separators for a language.
fn separators(language: &str) -> (&'static str, &'static str) {
    match language {
        // Comma decimal, period grouping
        "de" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs" | "sk"
        | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "tr" | "id" | "vi" => (",", "."),
        // Comma decimal, space grouping
        "fr" => (",", "\u{202F}"),
        _ => (".", ","),
    }
}

/// Add grouping separators to a string of digits.
fn add_grouping(digits: &str, separator: &str) -> String {
    let len = digits.chars().count();
    if len <= 3 {
        return digits.to_string();
    }
    let mut result = String::with_capacity(len + len.div_euclid(3) * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

fn scale_percent(n: Number) -> Number {
    match n {
        Number::Integer(i) => i
            .checked_mul(100)
            .map_or(Number::Decimal(i as f64 * 100.0), Number::Integer),
        Number::Decimal(f) => Number::Decimal(f * 100.0),
    }
}

fn format_decimal(n: Number, locale: &str, pattern: &DecimalPattern) -> String {
    let (decimal_separator, group_separator) = separators(language_of(locale));
    let n = if pattern.percent { scale_percent(n) } else { n };

    let (integer, mut fraction) = match n {
        Number::Integer(i) => (i.unsigned_abs().to_string(), String::new()),
        Number::Decimal(f) => {
            let text = format!("{:.*}", pattern.max_fraction, f.abs());
            let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
            (integer.to_string(), fraction.to_string())
        }
    };
    while fraction.len() > pattern.min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }
    while fraction.len() < pattern.min_fraction {
        fraction.push('0');
    }

    let is_zero = integer.chars().chain(fraction.chars()).all(|c| c == '0');
    let mut out = String::new();
    if n.is_negative() && !is_zero {
        out.push('-');
    }
    if pattern.grouping {
        out.push_str(&add_grouping(&integer, group_separator));
    } else {
        out.push_str(&integer);
    }
    if !fraction.is_empty() {
        out.push_str(decimal_separator);
        out.push_str(&fraction);
    }
    if pattern.percent {
        out.push('%');
    }
    out
}

// =========================================================================
// Currency
// =========================================================================

/// ISO 4217 code for a locale, from its region or else its language.
fn currency_code(locale: &str) -> &'static str {
    match region_of(locale) {
        Some("US") => "USD",
        Some("GB") => "GBP",
        Some("JP") => "JPY",
        Some("CN") => "CNY",
        Some("KR") => "KRW",
        Some("IN") => "INR",
        Some("RU") => "RUB",
        Some("BR") => "BRL",
        Some("CH") => "CHF",
        Some("CA") => "CAD",
        Some("AU") => "AUD",
        Some("MX") => "MXN",
        Some("PL") => "PLN",
        Some(_) | None => match language_of(locale) {
            "de" | "fr" | "es" | "it" | "nl" | "pt" | "fi" | "el" | "sk" => "EUR",
            "ja" => "JPY",
            "zh" => "CNY",
            "ko" => "KRW",
            "ru" => "RUB",
            "pl" => "PLN",
            _ => "USD",
        },
    }
}

/// Symbol and fraction digits for a currency code.
fn currency_symbol(code: &str) -> (&'static str, usize) {
    match code {
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "CNY" => ("¥", 2),
        "KRW" => ("₩", 0),
        "INR" => ("₹", 2),
        "RUB" => ("₽", 2),
        "BRL" => ("R$", 2),
        "CHF" => ("CHF", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "MXN" => ("MX$", 2),
        "PLN" => ("zł", 2),
        _ => ("$", 2),
    }
}

fn format_currency(n: Number, locale: &str) -> String {
    let (symbol, digits) = currency_symbol(currency_code(locale));
    let pattern = DecimalPattern {
        min_fraction: digits,
        max_fraction: digits,
        grouping: true,
        percent: false,
    };
    // The sign goes before a leading symbol; amounts rounding to zero have none.
    let formatted = format_decimal(n, locale, &pattern);
    let (sign, amount) = match formatted.strip_prefix('-') {
        Some(amount) => ("-", amount),
        None => ("", formatted.as_str()),
    };
    let symbol_before = !matches!(
        language_of(locale),
        "de" | "fr" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs"
            | "sk" | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "vi"
    );
    if symbol_before {
        format!("{sign}{symbol}{amount}")
    } else {
        format!("{sign}{amount}\u{A0}{symbol}")
    }
}

// =========================================================================
// Spellout, ordinals, durations
// =========================================================================

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

fn spell_out_english(n: Number) -> String {
    let words = match n {
        Number::Integer(i) => spell_integer(i.unsigned_abs()),
        Number::Decimal(f) if !f.is_finite() => return f.to_string(),
        Number::Decimal(f) => {
            let text = format!("{}", f.abs());
            let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
            let mut words = integer
                .parse::<u64>()
                .map_or_else(|_| integer.to_string(), spell_integer);
            if !fraction.is_empty() {
                words.push_str(" point");
                for digit in fraction.chars().filter_map(|c| c.to_digit(10)) {
                    words.push(' ');
                    words.push_str(ONES[digit as usize]);
                }
            }
            words
        }
    };
    if n.is_negative() {
        format!("minus {words}")
    } else {
        words
    }
}

fn spell_integer(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let (tens, ones) = (n.div_euclid(10), n.rem_euclid(10));
        return if ones == 0 {
            TENS[tens as usize].to_string()
        } else {
            format!("{}-{}", TENS[tens as usize], ONES[ones as usize])
        };
    }
    let (scale, name) = SCALES
        .iter()
        .copied()
        .find(|(scale, _)| n >= *scale)
        .unwrap_or((100, "hundred"));
    let (count, rest) = (n.div_euclid(scale), n.rem_euclid(scale));
    let mut words = format!("{} {name}", spell_integer(count));
    if rest > 0 {
        words.push(' ');
        words.push_str(&spell_integer(rest));
    }
    words
}

fn english_ordinal_suffix(n: i64) -> &'static str {
    let n = n.unsigned_abs();
    match (n.rem_euclid(10), n.rem_euclid(100)) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Render a number of seconds as `h:mm:ss`, or `m:ss` under an hour.
fn format_duration(n: Number) -> String {
    let total = match n {
        Number::Integer(i) => i,
        Number::Decimal(f) if f.is_finite() => f.round() as i64,
        Number::Decimal(f) => return f.to_string(),
    };
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (
        total.div_euclid(3600),
        total.rem_euclid(3600).div_euclid(60),
        total.rem_euclid(60),
    );
    if hours > 0 {
        format!("{sign}{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{minutes}:{seconds:02}")
    }
}
