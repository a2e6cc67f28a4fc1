//! Message pattern parser.
//!
//! This module parses ICU-style message patterns into an AST. The AST can be
//! compiled for formatting or consumed by external tooling.

pub mod ast;
pub mod error;
mod message;

pub use ast::*;
pub use error::SyntaxError;
pub use message::{parse, parse_bytes};
