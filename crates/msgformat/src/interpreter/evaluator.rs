//! Evaluation of compiled operation trees.
//!
//! The evaluator holds no state of its own: everything that varies per call
//! lives in the [`EvalContext`], everything that varies per locale is passed
//! in with the services.

use crate::interpreter::compiler::{Op, find_branch};
use crate::interpreter::{EvalContext, LocaleServices, RuleSet};
use crate::types::Value;

/// Evaluate an operation tree, producing the formatted string.
///
/// Unbound arguments render as `{id}` and are recorded in `ctx`; whether
/// that is an error is up to the caller.
pub fn evaluate(
    op: &Op,
    ctx: &mut EvalContext<'_>,
    locale: &str,
    services: &LocaleServices,
) -> String {
    let mut out = String::new();
    render(op, ctx, locale, services, &mut out);
    out
}

fn render(
    op: &Op,
    ctx: &mut EvalContext<'_>,
    locale: &str,
    services: &LocaleServices,
    out: &mut String,
) {
    match op {
        Op::Literal(text) => out.push_str(text),
        Op::Sequence(ops) => {
            for op in ops {
                render(op, ctx, locale, services, out);
            }
        }
        Op::Simple { id } => match ctx.lookup(id) {
            Some(value) => out.push_str(&value.to_string()),
            None => push_placeholder(id, out),
        },
        Op::Number { id, offset, style } => match ctx.lookup(id) {
            Some(value) => match value.as_number() {
                Some(n) => out.push_str(&services.numbers.format_number(
                    n.minus_offset(*offset),
                    locale,
                    style,
                )),
                None => out.push_str(&value.to_string()),
            },
            None => push_placeholder(id, out),
        },
        Op::DateTime { id, part, style } => match ctx.lookup(id) {
            Some(value) => match value.as_date_time() {
                Some(date_time) => out.push_str(
                    &services
                        .dates
                        .format_date_time(date_time, locale, *part, style),
                ),
                None => out.push_str(&value.to_string()),
            },
            None => push_placeholder(id, out),
        },
        Op::Plural {
            id,
            rule_set,
            offset,
            options,
            other,
        } => {
            let branch = ctx
                .lookup(id)
                .and_then(|value| {
                    plural_branch(value, options, *rule_set, *offset, locale, services)
                })
                .unwrap_or(&**other);
            render(branch, ctx, locale, services, out);
        }
        Op::Select { id, options, other } => {
            let branch = ctx
                .lookup(id)
                .and_then(|value| find_branch(options, &value.to_string()))
                .unwrap_or(&**other);
            render(branch, ctx, locale, services, out);
        }
    }
}

/// Choose a plural branch: an exact `=value` match on the unshifted value
/// first, then the category of the value minus the offset.
fn plural_branch<'o>(
    value: &Value,
    options: &'o [(String, Op)],
    rule_set: RuleSet,
    offset: u32,
    locale: &str,
    services: &LocaleServices,
) -> Option<&'o Op> {
    if let Some(op) = find_branch(options, &format!("={value}")) {
        return Some(op);
    }
    let n = value.as_number()?.minus_offset(offset);
    let category = services.plurals.category(n, locale, rule_set);
    find_branch(options, category.as_str())
}

fn push_placeholder(id: &str, out: &mut String) {
    out.push('{');
    out.push_str(id);
    out.push('}');
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::interpreter::NumberStyle;

    fn number(id: &str, offset: u32) -> Op {
        Op::Number {
            id: id.into(),
            offset,
            style: NumberStyle::Default,
        }
    }

    #[test]
    fn exact_match_uses_unshifted_value() {
        let op = Op::Plural {
            id: "n".into(),
            rule_set: RuleSet::Cardinal,
            offset: 1,
            options: vec![
                ("=1".into(), Op::Literal("exact".into())),
                ("one".into(), Op::Literal("one".into())),
            ],
            other: Box::new(number("n", 1)),
        };
        let services = LocaleServices::default();
        let render_with = |n: i64| {
            let bindings = HashMap::from([("n".to_string(), Value::from(n))]);
            evaluate(&op, &mut EvalContext::new(&bindings), "en", &services)
        };
        assert_eq!(render_with(1), "exact");
        assert_eq!(render_with(2), "one");
        assert_eq!(render_with(5), "4");
    }

    #[test]
    fn missing_values_render_placeholders() {
        let op = Op::Sequence(vec![
            Op::Simple { id: "a".into() },
            Op::Literal(" ".into()),
            number("b", 0),
        ]);
        let bindings = HashMap::new();
        let mut ctx = EvalContext::new(&bindings);
        let text = evaluate(&op, &mut ctx, "en", &LocaleServices::default());
        assert_eq!(text, "{a} {b}");
        assert_eq!(ctx.missing(), ["a", "b"]);
    }

    #[test]
    fn non_numeric_number_renders_display_form() {
        let bindings = HashMap::from([("n".to_string(), Value::from("lots"))]);
        let text = evaluate(
            &number("n", 0),
            &mut EvalContext::new(&bindings),
            "en",
            &LocaleServices::default(),
        );
        assert_eq!(text, "lots");
    }
}
