//! One-step parse-and-compile façade.

use std::collections::HashMap;

use bon::bon;
use thiserror::Error;

use crate::global::default_locale;
use crate::interpreter::{CompileOptions, CompiledMessage, FormatError, LocaleServices, compile};
use crate::parser::{Message, SyntaxError, parse};
use crate::types::Value;

/// Any error from parsing or formatting a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// A pattern parsed and compiled for one locale.
///
/// # Example
///
/// ```
/// use msgformat::{MessageFormat, params};
///
/// let message = MessageFormat::new(
///     "{count, plural, =0 {No items} one {One item} other {# items}}",
///     "en",
/// )
/// .unwrap();
/// assert_eq!(message.format(&params! { "count" => 0 }).unwrap(), "No items");
/// assert_eq!(message.format(&params! { "count" => 1200 }).unwrap(), "1,200 items");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFormat {
    pattern: String,
    message: Message,
    compiled: CompiledMessage,
}

#[bon]
impl MessageFormat {
    /// Parse and compile `pattern` for `locale` with default options.
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] if the pattern is malformed.
    pub fn new(
        pattern: impl Into<String>,
        locale: impl Into<String>,
    ) -> Result<Self, SyntaxError> {
        Self::with_options(
            pattern.into(),
            locale.into(),
            false,
            LocaleServices::default(),
        )
    }

    /// Parse and compile with every option spelled out.
    ///
    /// Also available as a builder through [`MessageFormat::builder`], where
    /// the locale defaults to the process-wide default locale.
    ///
    /// ```
    /// use msgformat::{MessageFormat, params};
    ///
    /// let message = MessageFormat::builder()
    ///     .pattern("Hello {name}")
    ///     .strict_missing_params(true)
    ///     .build()
    ///     .unwrap();
    /// assert!(message.format(&params! {}).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] if the pattern is malformed.
    #[builder(start_fn = builder, finish_fn = build, on(String, into))]
    pub fn with_options(
        pattern: String,
        #[builder(default = default_locale())] locale: String,
        #[builder(default)] strict_missing_params: bool,
        #[builder(default)] services: LocaleServices,
    ) -> Result<Self, SyntaxError> {
        let message = parse(&pattern)?;
        let options = CompileOptions::builder()
            .locale(locale)
            .strict_missing_params(strict_missing_params)
            .services(services)
            .build();
        let compiled = compile(&message, options);
        Ok(Self {
            pattern,
            message,
            compiled,
        })
    }
}

impl MessageFormat {
    /// Render the message with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingParameters`] in strict mode when an
    /// argument the message reads is unbound.
    pub fn format(&self, args: &HashMap<String, Value>) -> Result<String, FormatError> {
        self.compiled.format(args)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn locale(&self) -> &str {
        self.compiled.locale()
    }

    /// The parsed form of the pattern.
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn compiled(&self) -> &CompiledMessage {
        &self.compiled
    }
}

/// Parse, compile and format a pattern in one call.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for a malformed pattern. Formatting is lenient,
/// so [`Error::Format`] is never produced here.
///
/// ```
/// use msgformat::{format_message, params};
///
/// let text = format_message("{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}",
///     &params! { "n" => 22 }, "en").unwrap();
/// assert_eq!(text, "22nd");
/// ```
pub fn format_message(
    pattern: &str,
    args: &HashMap<String, Value>,
    locale: &str,
) -> Result<String, Error> {
    Ok(MessageFormat::new(pattern, locale)?.format(args)?)
}
