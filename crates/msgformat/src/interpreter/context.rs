//! Evaluation context for one `format` call.

use std::collections::HashMap;

use crate::types::Value;

/// Per-call state threaded through evaluation.
///
/// Holds the caller's bindings and records every argument id that was read
/// but not bound. A compiled message is shared; each call gets its own
/// context, so concurrent formatting never shares this state.
pub struct EvalContext<'a> {
    /// Argument values for this call.
    bindings: &'a HashMap<String, Value>,
    /// Ids read but not bound, in first-read order, without repeats.
    missing: Vec<String>,
}

impl<'a> EvalContext<'a> {
    /// Create a context over a set of bindings.
    pub fn new(bindings: &'a HashMap<String, Value>) -> Self {
        Self {
            bindings,
            missing: Vec::new(),
        }
    }

    /// Look up an argument, recording it as missing when unbound.
    pub fn lookup(&mut self, id: &str) -> Option<&'a Value> {
        let value = self.bindings.get(id);
        if value.is_none() && !self.missing.iter().any(|m| m == id) {
            self.missing.push(id.to_string());
        }
        value
    }

    /// Ids that were read but not bound so far.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Consume the context, returning the missing ids.
    pub fn into_missing(self) -> Vec<String> {
        self.missing
    }
}
