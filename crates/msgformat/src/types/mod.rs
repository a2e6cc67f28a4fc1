mod category;
mod number;
mod value;

pub use category::PluralCategory;
pub use number::Number;
pub use value::Value;
