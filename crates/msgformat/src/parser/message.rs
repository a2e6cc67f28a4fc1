//! Message pattern parser.
//!
//! A hand-rolled recursive descent parser over an explicit cursor. Handles:
//! - Literal text with ICU apostrophe quoting
//! - Simple, typed, plural, selectordinal and select arguments
//! - `#` markers inside plural-family branches
//! - `offset:` clauses
//!
//! Small token-level pieces (whitespace runs, digits, type keywords) are
//! winnow parsers run directly on the cursor's remaining input.

use std::str;

use strsim::levenshtein;
use winnow::ascii::digit1;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{ArgumentKind, Element, Message, SubMessage};
use super::error::SyntaxError;

/// Argument type keywords, in matching order. `selectordinal` must be tried
/// before its prefix `select`.
const ARGUMENT_TYPES: [&str; 9] = [
    "number",
    "date",
    "time",
    "ordinal",
    "duration",
    "spellout",
    "plural",
    "selectordinal",
    "select",
];

/// Parse a message pattern into an AST.
///
/// # Example
///
/// ```
/// use msgformat::parser::{Element, parse};
///
/// let message = parse("Hello, {name}!").unwrap();
/// assert_eq!(message.elements.len(), 3);
/// assert_eq!(message.elements[1], Element::Argument { id: "name".into() });
/// ```
pub fn parse(pattern: &str) -> Result<Message, SyntaxError> {
    Cursor::new(pattern).message(Scope::Root)
}

/// Parse a pattern given as raw bytes, rejecting invalid UTF-8.
pub fn parse_bytes(pattern: &[u8]) -> Result<Message, SyntaxError> {
    match str::from_utf8(pattern) {
        Ok(text) => parse(text),
        Err(e) => {
            let valid = String::from_utf8_lossy(&pattern[..e.valid_up_to()]);
            let mut cursor = Cursor::new(&valid);
            cursor.rest = "";
            Err(cursor.error_found(
                Some("UTF-8 pattern"),
                "invalid UTF-8".to_string(),
                None,
            ))
        }
    }
}

/// What terminates a run of text, and whether `#` is a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// The top-level message; must run to end of input.
    Root,
    /// Any branch nested inside a `plural` or `selectordinal` clause;
    /// `#` is special.
    Plural,
    /// A `select` branch outside any plural.
    Select,
    /// A simple argument's style; whitespace ends the token.
    Style,
}

impl Scope {
    fn is_special(self, c: char) -> bool {
        match c {
            '{' | '}' => true,
            '#' => self == Scope::Plural,
            c if is_whitespace(c) => self == Scope::Style,
            _ => false,
        }
    }
}

/// Immutable pattern plus a mutable position, one per `parse` call.
struct Cursor<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        // A zero-or-more run cannot fail.
        let _ = whitespace(&mut self.rest);
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    /// message := text (argument text)*
    fn message(&mut self, scope: Scope) -> Result<Message, SyntaxError> {
        let mut elements = Vec::new();
        loop {
            let text = self.text(scope);
            if !text.is_empty() {
                elements.push(Element::Literal(text));
            }
            match self.peek() {
                None => break,
                Some('}') if scope == Scope::Root => return Err(self.error(None)),
                Some('}') => break,
                Some(_) => elements.push(self.argument(scope)?),
            }
        }
        Ok(Message::new(elements))
    }

    /// Scan literal text up to the next character special in `scope`,
    /// resolving apostrophe quoting along the way.
    fn text(&mut self, scope: Scope) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if scope.is_special(c) {
                break;
            }
            self.bump();
            if c != '\'' {
                text.push(c);
                continue;
            }
            match self.peek() {
                Some('\'') => {
                    text.push('\'');
                    self.bump();
                }
                Some(next) if scope.is_special(next) => {
                    text.push(next);
                    self.bump();
                    self.quoted_run(&mut text);
                }
                _ => text.push('\''),
            }
        }
        text
    }

    /// Copy a quoted run verbatim up to the closing apostrophe. An unclosed
    /// run consumes the rest of the input.
    fn quoted_run(&mut self, text: &mut String) {
        while let Some(c) = self.bump() {
            if c != '\'' {
                text.push(c);
            } else if self.eat('\'') {
                text.push('\'');
            } else {
                return;
            }
        }
    }

    /// argument := '#' | '{' id (',' type (',' format)?)? '}'
    fn argument(&mut self, scope: Scope) -> Result<Element, SyntaxError> {
        if self.eat('#') {
            return Ok(Element::Pound);
        }
        self.bump(); // {

        let id = self.argument_id()?;
        if self.eat('}') {
            return Ok(Element::Argument { id });
        }
        if !self.eat(',') {
            return Err(self.error(Some(",")));
        }

        let keyword = self.argument_type()?;
        let is_clause = matches!(keyword, "plural" | "selectordinal" | "select");
        if self.peek() == Some('}') {
            if is_clause {
                return Err(self.error(Some(&format!("{keyword} message options"))));
            }
            self.bump();
            return Ok(typed_element(id, keyword, None));
        }
        if !self.eat(',') {
            return Err(self.error(Some(",")));
        }

        let element = match keyword {
            "plural" | "selectordinal" => {
                let offset = self.plural_offset()?;
                let options = self.sub_messages(keyword, Scope::Plural)?;
                Element::Plural {
                    id,
                    ordinal: keyword == "selectordinal",
                    offset,
                    options,
                }
            }
            "select" => {
                let branch_scope = if scope == Scope::Plural {
                    Scope::Plural
                } else {
                    Scope::Select
                };
                Element::Select {
                    id,
                    options: self.sub_messages(keyword, branch_scope)?,
                }
            }
            _ => {
                let style = self.simple_style()?;
                typed_element(id, keyword, Some(style))
            }
        };
        if !self.eat('}') {
            return Err(self.error(Some("}")));
        }
        Ok(element)
    }

    fn argument_id(&mut self) -> Result<String, SyntaxError> {
        self.skip_whitespace();
        let mut id = String::new();
        while let Some(c) = self.peek() {
            match c {
                '{' | '#' => return Err(self.error(Some("argument id"))),
                '}' | ',' => break,
                c if is_whitespace(c) => break,
                c => {
                    id.push(c);
                    self.bump();
                }
            }
        }
        if id.is_empty() {
            return Err(self.error(Some("argument id")));
        }
        self.skip_whitespace();
        Ok(id)
    }

    fn argument_type(&mut self) -> Result<&'a str, SyntaxError> {
        self.skip_whitespace();
        let Ok(keyword) = argument_type_keyword(&mut self.rest) else {
            let word: String = self
                .rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            let mut error = self.error(Some(&ARGUMENT_TYPES.join(", ")));
            error.suggestions = compute_suggestions(&word, &ARGUMENT_TYPES);
            return Err(error);
        };
        self.skip_whitespace();
        Ok(keyword)
    }

    fn simple_style(&mut self) -> Result<String, SyntaxError> {
        self.skip_whitespace();
        let style = self.text(Scope::Style);
        if style.is_empty() {
            return Err(self.error(Some("argument style name")));
        }
        self.skip_whitespace();
        Ok(style)
    }

    /// offset := ('offset:' digits)?
    fn plural_offset(&mut self) -> Result<u32, SyntaxError> {
        self.skip_whitespace();
        let Some(after) = self.rest.strip_prefix("offset:") else {
            return Ok(0);
        };
        self.rest = after;
        self.skip_whitespace();

        let mut lookahead = self.rest;
        let offset = digits(&mut lookahead)
            .ok()
            .and_then(|digits| digits.parse::<u32>().ok());
        let Some(offset) = offset else {
            return Err(self.error(Some("offset number")));
        };
        self.rest = lookahead;
        self.skip_whitespace();
        Ok(offset)
    }

    /// sub_messages := (selector '{' message '}')+
    fn sub_messages(
        &mut self,
        keyword: &str,
        scope: Scope,
    ) -> Result<Vec<SubMessage>, SyntaxError> {
        self.skip_whitespace();
        let mut options: Vec<SubMessage> = Vec::new();
        while self.peek().is_some_and(|c| c != '}') {
            let selector = self.selector()?;
            let message = self.sub_message(scope)?;
            match options.iter_mut().find(|option| option.selector == selector) {
                Some(existing) => existing.message = message,
                None => options.push(SubMessage { selector, message }),
            }
            self.skip_whitespace();
        }
        if options.is_empty() {
            return Err(self.error(Some(&format!("{keyword} message options"))));
        }
        if !options.iter().any(|option| option.selector == "other") {
            let message = format!("\"other\" option must be specified in {keyword}");
            return Err(self.error_found(None, self.found(), Some(message)));
        }
        Ok(options)
    }

    fn selector(&mut self) -> Result<String, SyntaxError> {
        let mut selector = String::new();
        while let Some(c) = self.peek() {
            match c {
                '}' | ',' => return Err(self.error(Some("{"))),
                '{' => break,
                c if is_whitespace(c) => break,
                c => {
                    selector.push(c);
                    self.bump();
                }
            }
        }
        if selector.is_empty() {
            return Err(self.error(Some("selector")));
        }
        self.skip_whitespace();
        Ok(selector)
    }

    fn sub_message(&mut self, scope: Scope) -> Result<Message, SyntaxError> {
        if !self.eat('{') {
            return Err(self.error(Some("{")));
        }
        let message = self.message(scope)?;
        if !self.eat('}') {
            return Err(self.error(Some("}")));
        }
        Ok(message)
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn found(&self) -> String {
        self.peek()
            .map_or_else(|| "end of input".to_string(), String::from)
    }

    fn error(&self, expected: Option<&str>) -> SyntaxError {
        self.error_found(expected, self.found(), None)
    }

    fn error_found(
        &self,
        expected: Option<&str>,
        found: String,
        message: Option<String>,
    ) -> SyntaxError {
        let offset = self.offset();
        let (line, column) = calculate_position(self.source, offset);
        let description = message.unwrap_or_else(|| match expected {
            Some(expected) => format!("expected \"{expected}\" but found \"{found}\""),
            None => format!("unexpected \"{found}\" found"),
        });
        SyntaxError {
            expected: expected.map(ToString::to_string),
            message: format!(
                "{description} in \"{}\"",
                self.source.replace("\r\n", "\n")
            ),
            description,
            found,
            offset,
            line,
            column,
            suggestions: Vec::new(),
        }
    }
}

/// Build the element for a non-clause argument type.
fn typed_element(id: String, keyword: &str, style: Option<String>) -> Element {
    let (kind, style) = match keyword {
        "date" => (ArgumentKind::Date, style),
        "time" => (ArgumentKind::Time, style),
        "spellout" | "ordinal" | "duration" => (ArgumentKind::Number, Some(keyword.to_string())),
        _ => (ArgumentKind::Number, style),
    };
    Element::Typed { id, kind, style }
}

/// Calculate 1-based line and column for a byte offset.
fn calculate_position(source: &str, offset: usize) -> (usize, usize) {
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed[line_start..].chars().count() + 1;
    (line, column)
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for words <= 3 chars
/// - distance <= 2 for longer words
/// - limited to 3 suggestions, sorted by distance
fn compute_suggestions(word: &str, available: &[&str]) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }
    let max_distance = if word.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(word, candidate);
            (dist <= max_distance && dist > 0).then(|| (dist, (*candidate).to_string()))
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\u{000C}' | '\u{000B}' | '\u{00A0}' | '\u{2028}' | '\u{2029}'
    )
}

/// Parse a (possibly empty) whitespace run.
fn whitespace(input: &mut &str) -> ModalResult<()> {
    take_while(0.., is_whitespace).void().parse_next(input)
}

/// Parse a run of ASCII digits.
fn digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    digit1.parse_next(input)
}

/// Parse an argument type keyword.
fn argument_type_keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        "number",
        "date",
        "time",
        "ordinal",
        "duration",
        "spellout",
        "plural",
        "selectordinal",
        "select",
    ))
    .parse_next(input)
}
