//! Process-wide default locale.
//!
//! Used by [`CompileOptions`](crate::interpreter::CompileOptions) and the
//! [`MessageFormat`](crate::MessageFormat) façade when no locale is given.

use std::sync::{LazyLock, PoisonError, RwLock};

static DEFAULT_LOCALE: LazyLock<RwLock<String>> = LazyLock::new(|| RwLock::new("en".to_string()));

/// Provides read access to the default locale.
fn with_locale<T>(f: impl FnOnce(&str) -> T) -> T {
    let guard = DEFAULT_LOCALE.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Sets the default locale for messages compiled without one.
///
/// Messages already compiled keep the locale they were compiled with.
pub fn set_default_locale(locale: impl Into<String>) {
    let mut guard = DEFAULT_LOCALE.write().unwrap_or_else(PoisonError::into_inner);
    *guard = locale.into();
}

/// Returns the current default locale (`"en"` unless changed).
pub fn default_locale() -> String {
    with_locale(str::to_owned)
}
