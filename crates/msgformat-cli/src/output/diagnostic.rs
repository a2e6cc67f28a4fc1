//! Miette diagnostic wrapper for pattern syntax errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use msgformat::SyntaxError;
use thiserror::Error;

/// A miette-compatible diagnostic for a pattern syntax error.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(msgformat::syntax))]
pub struct PatternDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    label: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl PatternDiagnostic {
    /// Create a diagnostic from a syntax error in `pattern`.
    ///
    /// `name` identifies the pattern, e.g. `file.json#greeting`.
    pub fn from_syntax_error(name: &str, pattern: &str, err: &SyntaxError) -> Self {
        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = err.offset.min(pattern.len());
        let length = pattern[offset..].chars().next().map_or(0, char::len_utf8);

        let label = match &err.expected {
            Some(expected) => format!("expected {expected}"),
            None => "unexpected here".to_string(),
        };
        let help = match err.suggestions.as_slice() {
            [] => None,
            [one] => Some(format!("did you mean '{one}'?")),
            many => Some(format!("did you mean one of: {}?", many.join(", "))),
        };

        PatternDiagnostic {
            src: NamedSource::new(name, pattern.to_string()),
            span: (offset, length).into(),
            label,
            message: err.description.clone(),
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use msgformat::parse;

    use super::*;

    #[test]
    fn diagnostic_points_at_error_offset() {
        let err = parse("{n, nubmer}").unwrap_err();
        let diagnostic = PatternDiagnostic::from_syntax_error("inline", "{n, nubmer}", &err);
        assert_eq!(diagnostic.span.offset(), 4);
        assert_eq!(diagnostic.span.len(), 1);
        assert_eq!(diagnostic.help.as_deref(), Some("did you mean 'number'?"));
        assert!(!diagnostic.message.contains("in \"{n"));
    }

    #[test]
    fn message_keeps_quotes_from_pattern_out() {
        let pattern = "say \"hi\" in \"French\" {n, nubmer}";
        let err = parse(pattern).unwrap_err();
        let diagnostic = PatternDiagnostic::from_syntax_error("inline", pattern, &err);
        assert_eq!(
            diagnostic.message,
            "expected \"number, date, time, ordinal, duration, spellout, plural, selectordinal, select\" but found \"n\""
        );
    }

    #[test]
    fn end_of_input_has_empty_span() {
        let err = parse("{a").unwrap_err();
        let diagnostic = PatternDiagnostic::from_syntax_error("inline", "{a", &err);
        assert_eq!(diagnostic.span.offset(), 2);
        assert_eq!(diagnostic.span.len(), 0);
        assert_eq!(diagnostic.label, "expected ,");
    }
}
