//! Parse error type for message patterns.

use thiserror::Error;

/// A syntax error in a message pattern.
///
/// `offset` is a byte offset into the pattern; `line` and `column` are
/// 1-based, with the column counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// What would have been valid at the failure point, if known.
    pub expected: Option<String>,
    /// The offending character, or `end of input`.
    pub found: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    /// Human-readable description including the full pattern.
    pub message: String,
    /// The same description without the pattern.
    pub description: String,
    /// Close matches for a misspelled keyword, closest first.
    pub suggestions: Vec<String>,
}
