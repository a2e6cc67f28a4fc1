//! CLI command implementations.

mod check;
mod format;
mod inspect;

pub use check::{run_check, CheckArgs};
pub use format::{run_format, FormatArgs};
pub use inspect::{run_inspect, InspectArgs};
