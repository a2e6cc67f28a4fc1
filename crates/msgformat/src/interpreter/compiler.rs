//! Compilation of parsed messages into operation trees.
//!
//! A [`Message`] is compiled once per locale into a [`CompiledMessage`],
//! which can then be formatted any number of times, from any thread.

use std::collections::HashMap;

use bon::Builder;
use log::debug;

use crate::global::default_locale;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::{
    DateTimePart, DateTimeStyle, EvalContext, FormatError, LocaleServices, NumberStyle, RuleSet,
};
use crate::parser::ast::{ArgumentKind, Element, Message, SubMessage};
use crate::types::Value;

/// A node of a compiled message.
///
/// The tree is fixed at compile time; evaluation only walks it.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Fixed text.
    Literal(String),
    /// Operations rendered in order and concatenated.
    Sequence(Vec<Op>),
    /// `{id}`: the value's display form.
    Simple { id: String },
    /// A number argument, or `#` with the offset of its plural.
    Number {
        id: String,
        offset: u32,
        style: NumberStyle,
    },
    /// A `date` or `time` argument.
    DateTime {
        id: String,
        part: DateTimePart,
        style: DateTimeStyle,
    },
    /// A `plural` or `selectordinal` clause.
    ///
    /// `options` holds every branch except `other`.
    Plural {
        id: String,
        rule_set: RuleSet,
        offset: u32,
        options: Vec<(String, Op)>,
        other: Box<Op>,
    },
    /// A `select` clause.
    Select {
        id: String,
        options: Vec<(String, Op)>,
        other: Box<Op>,
    },
}

impl Op {
    /// Returns the branch compiled for `selector`, if this is a clause.
    pub fn branch(&self, selector: &str) -> Option<&Op> {
        match self {
            Op::Plural { options, other, .. } | Op::Select { options, other, .. } => {
                if selector == "other" {
                    return Some(other);
                }
                find_branch(options, selector)
            }
            Op::Literal(_)
            | Op::Sequence(_)
            | Op::Simple { .. }
            | Op::Number { .. }
            | Op::DateTime { .. } => None,
        }
    }
}

pub(crate) fn find_branch<'a>(options: &'a [(String, Op)], selector: &str) -> Option<&'a Op> {
    options
        .iter()
        .find(|(key, _)| key == selector)
        .map(|(_, op)| op)
}

/// Options for [`compile`].
///
/// # Example
///
/// ```
/// use msgformat::interpreter::CompileOptions;
///
/// let options = CompileOptions::builder()
///     .locale("fr")
///     .strict_missing_params(true)
///     .build();
/// assert_eq!(options.locale, "fr");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct CompileOptions {
    /// Locale id such as `"en-US"`. Defaults to the process-wide default
    /// locale at the time the options are built.
    #[builder(default = default_locale())]
    pub locale: String,

    /// Fail `format` when an argument the message reads is unbound, instead
    /// of rendering a `{id}` placeholder.
    #[builder(default)]
    pub strict_missing_params: bool,

    #[builder(default)]
    pub services: LocaleServices,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions::builder().build()
    }
}

/// A message compiled for one locale.
///
/// Immutable once built. Each [`format`](CompiledMessage::format) call keeps
/// its own state, so a compiled message can be shared across threads.
#[derive(Debug, Clone)]
pub struct CompiledMessage {
    locale: String,
    strict: bool,
    services: LocaleServices,
    root: Op,
}

impl CompiledMessage {
    /// Render the message with the given argument bindings.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingParameters`] when the message was
    /// compiled with `strict_missing_params` and an argument it read is not
    /// bound. Only arguments read along the selected branches count.
    pub fn format(&self, bindings: &HashMap<String, Value>) -> Result<String, FormatError> {
        let mut ctx = EvalContext::new(bindings);
        let text = evaluate(&self.root, &mut ctx, &self.locale, &self.services);
        let missing = ctx.into_missing();
        if missing.is_empty() {
            return Ok(text);
        }
        if self.strict {
            return Err(FormatError::MissingParameters { ids: missing });
        }
        debug!("formatted with placeholders for missing {}", missing.join(", "));
        Ok(text)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The root of the compiled operation tree.
    pub fn operation(&self) -> &Op {
        &self.root
    }
}

/// Compile a parsed message for a locale.
///
/// Compilation never fails: a clause without an `other` branch (only
/// possible in a hand-built [`Message`]) gets an empty one.
///
/// # Example
///
/// ```
/// use msgformat::interpreter::{CompileOptions, compile};
/// use msgformat::{params, parse};
///
/// let message = parse("{n, plural, one {# file} other {# files}}").unwrap();
/// let compiled = compile(&message, CompileOptions::builder().locale("en").build());
/// assert_eq!(compiled.format(&params!{ "n" => 3 }).unwrap(), "3 files");
/// ```
pub fn compile(message: &Message, options: CompileOptions) -> CompiledMessage {
    let root = compile_message(message, None);
    debug!(
        "compiled message with {} top-level elements for '{}'",
        message.elements.len(),
        options.locale
    );
    CompiledMessage {
        locale: options.locale,
        strict: options.strict_missing_params,
        services: options.services,
        root,
    }
}

/// The argument and offset that `#` refers to inside a plural branch.
type PoundTarget<'a> = Option<(&'a str, u32)>;

fn compile_message(message: &Message, pound: PoundTarget<'_>) -> Op {
    let ops: Vec<Op> = message
        .elements
        .iter()
        .map(|element| compile_element(element, pound))
        .collect();
    match <[Op; 1]>::try_from(ops) {
        Ok([op]) => op,
        Err(ops) if ops.is_empty() => Op::Literal(String::new()),
        Err(ops) => Op::Sequence(ops),
    }
}

fn compile_element(element: &Element, pound: PoundTarget<'_>) -> Op {
    match element {
        Element::Literal(text) => Op::Literal(text.clone()),
        Element::Argument { id } => Op::Simple { id: id.clone() },
        Element::Typed { id, kind, style } => match kind {
            ArgumentKind::Number => Op::Number {
                id: id.clone(),
                offset: 0,
                style: NumberStyle::from_style(style.as_deref()),
            },
            ArgumentKind::Date | ArgumentKind::Time => Op::DateTime {
                id: id.clone(),
                part: if *kind == ArgumentKind::Date {
                    DateTimePart::Date
                } else {
                    DateTimePart::Time
                },
                style: DateTimeStyle::from_style(style.as_deref()),
            },
        },
        Element::Plural {
            id,
            ordinal,
            offset,
            options,
        } => {
            let (options, other) = compile_options(options, Some((id.as_str(), *offset)));
            Op::Plural {
                id: id.clone(),
                rule_set: if *ordinal {
                    RuleSet::Ordinal
                } else {
                    RuleSet::Cardinal
                },
                offset: *offset,
                options,
                other,
            }
        }
        Element::Select { id, options } => {
            let (options, other) = compile_options(options, pound);
            Op::Select {
                id: id.clone(),
                options,
                other,
            }
        }
        Element::Pound => match pound {
            Some((id, offset)) => Op::Number {
                id: id.to_string(),
                offset,
                style: NumberStyle::Default,
            },
            None => Op::Literal("#".to_string()),
        },
    }
}

/// Compile clause branches, splitting out `other`. A repeated selector
/// replaces the earlier branch.
fn compile_options(options: &[SubMessage], pound: PoundTarget<'_>) -> (Vec<(String, Op)>, Box<Op>) {
    let mut branches: Vec<(String, Op)> = Vec::with_capacity(options.len());
    let mut other = None;
    for option in options {
        let op = compile_message(&option.message, pound);
        if option.selector == "other" {
            other = Some(op);
        } else if let Some(slot) = branches.iter_mut().find(|(key, _)| *key == option.selector) {
            slot.1 = op;
        } else {
            branches.push((option.selector.clone(), op));
        }
    }
    (
        branches,
        Box::new(other.unwrap_or_else(|| Op::Literal(String::new()))),
    )
}
