//! Message compiler and evaluator.
//!
//! This module turns a parsed [`Message`](crate::Message) into a
//! [`CompiledMessage`] for one locale and renders it with argument bindings.
//! Plural categories, numbers and dates are delegated to the collaborators
//! in [`LocaleServices`].

mod compiler;
mod context;
mod datetime;
mod error;
mod evaluator;
mod number;
mod plural;
mod services;

pub use compiler::{CompileOptions, CompiledMessage, Op, compile};
pub use context::EvalContext;
pub use datetime::BasicDateTimeFormatter;
pub use error::FormatError;
pub use evaluator::evaluate;
pub use number::BasicNumberFormatter;
pub use plural::{IcuPluralRules, plural_category};
pub use services::{
    DateTimeFormatter, DateTimePart, DateTimeStyle, LocaleServices, NumberFormatter, NumberStyle,
    PluralCategoryResolver, RuleSet,
};
