//! Public AST types for message patterns.
//!
//! These types are public to enable external tooling (linters, extractors,
//! the `msgformat` CLI).

use serde::Serialize;

/// A parsed message: an ordered sequence of elements rendered by
/// concatenation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    pub elements: Vec<Element>,
}

/// An element within a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Literal text, already de-escaped.
    Literal(String),
    /// A simple substitution: `{name}`
    Argument { id: String },
    /// A formatted value: `{n, number, percent}`, `{d, date, short}`
    Typed {
        id: String,
        kind: ArgumentKind,
        style: Option<String>,
    },
    /// A plural-family clause: `{n, plural, offset:1 =0 {..} one {..} other {..}}`
    ///
    /// `ordinal` is set for `selectordinal`.
    Plural {
        id: String,
        ordinal: bool,
        offset: u32,
        options: Vec<SubMessage>,
    },
    /// A select clause: `{gender, select, male {..} other {..}}`
    Select { id: String, options: Vec<SubMessage> },
    /// The `#` marker inside a plural-family branch.
    Pound,
}

/// The value kind of a [`Element::Typed`] argument.
///
/// The `spellout`, `ordinal` and `duration` keywords parse to [`Number`]
/// with the keyword as style.
///
/// [`Number`]: ArgumentKind::Number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    Number,
    Date,
    Time,
}

impl ArgumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentKind::Number => "number",
            ArgumentKind::Date => "date",
            ArgumentKind::Time => "time",
        }
    }
}

/// One `selector {message}` branch of a plural or select clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubMessage {
    /// `other`, a category keyword, `=N`, or any select tag.
    pub selector: String,
    pub message: Message,
}

impl Message {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Argument ids referenced anywhere in this message, in first-use order.
    ///
    /// Ids appearing only as the subject of `#` are not repeated; the
    /// enclosing plural already names them.
    pub fn argument_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        for element in &self.elements {
            let (id, options) = match element {
                Element::Literal(_) | Element::Pound => continue,
                Element::Argument { id } | Element::Typed { id, .. } => (id, None),
                Element::Plural { id, options, .. } | Element::Select { id, options } => {
                    (id, Some(options))
                }
            };
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
            for option in options.into_iter().flatten() {
                option.message.collect_ids(ids);
            }
        }
    }
}

impl Element {
    /// Returns the option for `selector`, if this is a plural or select clause.
    pub fn option(&self, selector: &str) -> Option<&Message> {
        match self {
            Element::Plural { options, .. } | Element::Select { options, .. } => options
                .iter()
                .find(|option| option.selector == selector)
                .map(|option| &option.message),
            Element::Literal(_)
            | Element::Argument { .. }
            | Element::Typed { .. }
            | Element::Pound => None,
        }
    }
}
