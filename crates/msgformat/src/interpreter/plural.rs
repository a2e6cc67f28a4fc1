//! CLDR plural category resolution.
//!
//! This module provides plural category resolution following CLDR rules.
//! Different languages have different plural rules - English has "one" and "other",
//! while Russian has "one", "few", "many", and "other", and Arabic uses all six
//! categories: "zero", "one", "two", "few", "many", "other".
//!
//! Plural rules are cached per thread per language, script and region and
//! per rule set to avoid re-creating `PluralRules` instances on every call.
//! Tags that differ only in separators, variants or extensions share an
//! entry. The cache holds at most `MAX_CACHED_RULES` entries, dropping the
//! oldest first.

use std::cell::RefCell;

use fixed_decimal::Decimal;
use icu_locale_core::{LanguageIdentifier, Locale, locale};
use icu_plurals::{PluralCategory as IcuCategory, PluralOperands, PluralRuleType, PluralRules};
use log::{debug, warn};

use crate::interpreter::services::{PluralCategoryResolver, RuleSet};
use crate::types::{Number, PluralCategory};

/// Upper bound on cached rule sets per thread.
const MAX_CACHED_RULES: usize = 32;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by normalized language
    /// identifier and rule set, oldest first.
    ///
    /// `None` records a locale whose rules could not be loaded, so the
    /// failure is logged once.
    static PLURAL_RULES_CACHE: RefCell<Vec<(LanguageIdentifier, RuleSet, Option<PluralRules>)>> =
        const { RefCell::new(Vec::new()) };
}

/// Plural category resolver backed by ICU4X compiled CLDR data.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuPluralRules;

impl PluralCategoryResolver for IcuPluralRules {
    fn category(&self, n: Number, locale: &str, rule_set: RuleSet) -> PluralCategory {
        plural_category(locale, n, rule_set)
    }
}

/// Parse a locale tag down to its language, script and region, falling
/// back to English for malformed tags.
fn parse_locale(tag: &str) -> LanguageIdentifier {
    let id = Locale::try_from_str(&tag.replace('_', "-"))
        .map(|locale| locale.id)
        .unwrap_or_else(|_| {
            warn!("unrecognized locale '{tag}', using English plural rules");
            locale!("en").id
        });
    LanguageIdentifier::from((id.language, id.script, id.region))
}

/// Build `PluralRules` for a normalized locale and rule set.
fn build_rules(id: &LanguageIdentifier, rule_set: RuleSet) -> Option<PluralRules> {
    let rule_type = match rule_set {
        RuleSet::Cardinal => PluralRuleType::Cardinal,
        RuleSet::Ordinal => PluralRuleType::Ordinal,
    };
    debug!("loading {rule_set:?} plural rules for '{id}'");
    match PluralRules::try_new(id.into(), rule_type.into()) {
        Ok(rules) => Some(rules),
        Err(e) => {
            warn!("no plural rules for '{id}': {e}");
            None
        }
    }
}

/// Translate an ICU4X category to ours.
fn from_icu(category: IcuCategory) -> PluralCategory {
    match category {
        IcuCategory::Zero => PluralCategory::Zero,
        IcuCategory::One => PluralCategory::One,
        IcuCategory::Two => PluralCategory::Two,
        IcuCategory::Few => PluralCategory::Few,
        IcuCategory::Many => PluralCategory::Many,
        IcuCategory::Other => PluralCategory::Other,
    }
}

/// CLDR operands for a number; `None` for values with no decimal form.
fn operands(n: Number) -> Option<PluralOperands> {
    match n {
        Number::Integer(i) => Some(PluralOperands::from(i)),
        Number::Decimal(f) => Decimal::try_from_str(&f.to_string())
            .ok()
            .map(|decimal| PluralOperands::from(&decimal)),
    }
}

/// Get the CLDR plural category for a number in a given locale.
///
/// Rules are cached per thread per language and region, so repeated calls
/// with the same locale reuse the previously constructed `PluralRules`. Unknown locales
/// resolve through ICU4X locale fallback; numbers without a decimal form
/// (NaN, infinities) are `Other`.
///
/// # Examples
///
/// ```
/// use msgformat::interpreter::{RuleSet, plural_category};
/// use msgformat::{Number, PluralCategory};
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category("en", Number::Integer(1), RuleSet::Cardinal), PluralCategory::One);
/// assert_eq!(plural_category("en", Number::Integer(2), RuleSet::Cardinal), PluralCategory::Other);
///
/// // Russian: complex rules for "one", "few", "many", "other"
/// assert_eq!(plural_category("ru", Number::Integer(2), RuleSet::Cardinal), PluralCategory::Few);
/// assert_eq!(plural_category("ru", Number::Integer(5), RuleSet::Cardinal), PluralCategory::Many);
///
/// // English ordinals: 22nd
/// assert_eq!(plural_category("en", Number::Integer(22), RuleSet::Ordinal), PluralCategory::Two);
/// ```
pub fn plural_category(locale: &str, n: Number, rule_set: RuleSet) -> PluralCategory {
    let Some(operands) = operands(n) else {
        return PluralCategory::Other;
    };
    let id = parse_locale(locale);
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        let cached = cache
            .iter()
            .find(|(key, set, _)| *key == id && *set == rule_set);
        if let Some((_, _, rules)) = cached {
            return rules
                .as_ref()
                .map_or(PluralCategory::Other, |r| from_icu(r.category_for(operands)));
        }
        let rules = build_rules(&id, rule_set);
        let category = rules
            .as_ref()
            .map_or(PluralCategory::Other, |r| from_icu(r.category_for(operands)));
        if cache.len() >= MAX_CACHED_RULES {
            cache.remove(0);
        }
        cache.push((id, rule_set, rules));
        category
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardinal(locale: &str, n: i64) -> PluralCategory {
        plural_category(locale, Number::Integer(n), RuleSet::Cardinal)
    }

    #[test]
    fn arabic_uses_all_six_categories() {
        assert_eq!(cardinal("ar", 0), PluralCategory::Zero);
        assert_eq!(cardinal("ar", 1), PluralCategory::One);
        assert_eq!(cardinal("ar", 2), PluralCategory::Two);
        assert_eq!(cardinal("ar", 3), PluralCategory::Few);
        assert_eq!(cardinal("ar", 11), PluralCategory::Many);
        assert_eq!(cardinal("ar", 100), PluralCategory::Other);
    }

    #[test]
    fn fractions_use_visible_digits() {
        assert_eq!(
            plural_category("en", Number::Decimal(1.5), RuleSet::Cardinal),
            PluralCategory::Other
        );
        // Integral floats print without a fraction and behave like integers.
        assert_eq!(
            plural_category("en", Number::Decimal(1.0), RuleSet::Cardinal),
            PluralCategory::One
        );
    }

    #[test]
    fn region_and_underscore_tags_resolve() {
        assert_eq!(cardinal("en-US", 1), PluralCategory::One);
        assert_eq!(cardinal("ru_RU", 21), PluralCategory::One);
    }

    fn cached_entries() -> usize {
        PLURAL_RULES_CACHE.with_borrow(Vec::len)
    }

    #[test]
    fn equivalent_tags_share_a_cache_entry() {
        let before = cached_entries();
        assert_eq!(cardinal("en-US", 1), PluralCategory::One);
        assert_eq!(cardinal("en_US", 1), PluralCategory::One);
        assert_eq!(cardinal("en-US-u-ca-buddhist", 2), PluralCategory::Other);
        assert_eq!(cardinal("en-US-posix", 1), PluralCategory::One);
        assert_eq!(cached_entries(), before + 1);
    }

    #[test]
    fn cache_is_bounded() {
        for first in 'a'..='e' {
            for second in 'a'..='z' {
                cardinal(&format!("q{first}{second}"), 1);
            }
        }
        assert_eq!(cached_entries(), MAX_CACHED_RULES);
        assert_eq!(cardinal("ru", 21), PluralCategory::One);
        assert_eq!(cached_entries(), MAX_CACHED_RULES);
    }

    #[test]
    fn negative_numbers_use_absolute_value() {
        assert_eq!(cardinal("en", -1), PluralCategory::One);
    }

    #[test]
    fn non_finite_numbers_are_other() {
        assert_eq!(
            plural_category("en", Number::Decimal(f64::NAN), RuleSet::Cardinal),
            PluralCategory::Other
        );
    }
}
