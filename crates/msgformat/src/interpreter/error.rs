//! Error types for formatting compiled messages.

use thiserror::Error;

/// An error that occurred while formatting a compiled message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Arguments the message reads were not bound. Only raised when the
    /// message was compiled with `strict_missing_params`.
    #[error("missing parameters: {}", ids.join(", "))]
    MissingParameters { ids: Vec<String> },
}
