//! Locale service interfaces consumed by compiled messages.
//!
//! A compiled message never formats numbers, dates or plural categories on
//! its own. It delegates to three collaborators bundled in
//! [`LocaleServices`]. Implementations must be safe for concurrent reads;
//! the core adds no locking of its own.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;
use chrono::NaiveDateTime;

use crate::interpreter::datetime::BasicDateTimeFormatter;
use crate::interpreter::number::BasicNumberFormatter;
use crate::interpreter::plural::IcuPluralRules;
use crate::types::{Number, PluralCategory};

/// Which CLDR rule set a plural clause selects with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// `plural`: quantities ("1 day", "2 days").
    Cardinal,
    /// `selectordinal`: positions ("1st", "2nd").
    Ordinal,
}

/// Resolves the grammatical category of a number in a locale.
pub trait PluralCategoryResolver: Send + Sync {
    fn category(&self, n: Number, locale: &str, rule_set: RuleSet) -> PluralCategory;
}

/// Style of a `number` argument, or of the `spellout`/`ordinal`/`duration`
/// sugar keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberStyle {
    Default,
    Integer,
    Percent,
    Currency,
    Spellout,
    Ordinal,
    Duration,
    /// Any other style text, passed through to the formatter.
    Custom(String),
}

impl NumberStyle {
    pub fn from_style(style: Option<&str>) -> Self {
        match style {
            None => NumberStyle::Default,
            Some("integer") => NumberStyle::Integer,
            Some("percent") => NumberStyle::Percent,
            Some("currency") => NumberStyle::Currency,
            Some("spellout") => NumberStyle::Spellout,
            Some("ordinal") => NumberStyle::Ordinal,
            Some("duration") => NumberStyle::Duration,
            Some(custom) => NumberStyle::Custom(custom.to_string()),
        }
    }
}

/// Formats numbers for a locale.
pub trait NumberFormatter: Send + Sync {
    fn format_number(&self, n: Number, locale: &str, style: &NumberStyle) -> String;
}

/// Which half of a date-time a `date` or `time` argument renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePart {
    Date,
    Time,
}

/// Style of a `date` or `time` argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateTimeStyle {
    Short,
    #[default]
    Medium,
    Long,
    Full,
    /// A custom pattern such as `yMMMd` or a `strftime` string.
    Custom(String),
}

impl DateTimeStyle {
    pub fn from_style(style: Option<&str>) -> Self {
        match style {
            None | Some("medium") => DateTimeStyle::Medium,
            Some("short") => DateTimeStyle::Short,
            Some("long") => DateTimeStyle::Long,
            Some("full") => DateTimeStyle::Full,
            Some(custom) => DateTimeStyle::Custom(custom.to_string()),
        }
    }
}

/// Formats dates and times for a locale.
pub trait DateTimeFormatter: Send + Sync {
    fn format_date_time(
        &self,
        value: NaiveDateTime,
        locale: &str,
        part: DateTimePart,
        style: &DateTimeStyle,
    ) -> String;
}

/// The locale collaborators a compiled message holds on to.
///
/// Defaults to CLDR plural rules from ICU4X and the built-in basic number
/// and date formatters.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use msgformat::interpreter::{LocaleServices, NumberFormatter, NumberStyle};
/// use msgformat::Number;
///
/// struct Plain;
///
/// impl NumberFormatter for Plain {
///     fn format_number(&self, n: Number, _locale: &str, _style: &NumberStyle) -> String {
///         n.to_string()
///     }
/// }
///
/// let services = LocaleServices::builder().numbers(Arc::new(Plain)).build();
/// assert_eq!(
///     services.numbers.format_number(Number::Integer(1234), "en", &NumberStyle::Default),
///     "1234"
/// );
/// ```
#[derive(Clone, Builder)]
pub struct LocaleServices {
    #[builder(default = Arc::new(IcuPluralRules) as Arc<dyn PluralCategoryResolver>)]
    pub plurals: Arc<dyn PluralCategoryResolver>,

    #[builder(default = Arc::new(BasicNumberFormatter) as Arc<dyn NumberFormatter>)]
    pub numbers: Arc<dyn NumberFormatter>,

    #[builder(default = Arc::new(BasicDateTimeFormatter) as Arc<dyn DateTimeFormatter>)]
    pub dates: Arc<dyn DateTimeFormatter>,
}

impl Default for LocaleServices {
    fn default() -> Self {
        LocaleServices::builder().build()
    }
}

impl Debug for LocaleServices {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LocaleServices").finish_non_exhaustive()
    }
}

/// The language subtag of a locale identifier (`"pt"` for `"pt-BR"`).
pub(crate) fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// The region subtag of a locale identifier, if present (`"BR"` for `"pt-BR"`).
pub(crate) fn region_of(locale: &str) -> Option<&str> {
    locale
        .split(['-', '_'])
        .skip(1)
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_subtags() {
        assert_eq!(language_of("pt-BR"), "pt");
        assert_eq!(language_of("en"), "en");
        assert_eq!(region_of("en_GB"), Some("GB"));
        assert_eq!(region_of("zh-Hant-TW"), Some("TW"));
        assert_eq!(region_of("de"), None);
    }

    #[test]
    fn styles_from_keywords() {
        assert_eq!(NumberStyle::from_style(None), NumberStyle::Default);
        assert_eq!(
            NumberStyle::from_style(Some("#,##0.00")),
            NumberStyle::Custom("#,##0.00".into())
        );
        assert_eq!(DateTimeStyle::from_style(None), DateTimeStyle::Medium);
        assert_eq!(DateTimeStyle::from_style(Some("full")), DateTimeStyle::Full);
    }
}
