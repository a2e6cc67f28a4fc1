pub mod global;
pub mod interpreter;
mod message_format;
pub mod parser;
pub mod types;

pub use global::{default_locale, set_default_locale};
pub use interpreter::{CompileOptions, CompiledMessage, FormatError, compile};
pub use message_format::{Error, MessageFormat, format_message};
pub use parser::{Message, SyntaxError, parse, parse_bytes};
pub use types::{Number, PluralCategory, Value};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, or `chrono` dates directly.
///
/// # Example
///
/// ```
/// use msgformat::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_integer(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
