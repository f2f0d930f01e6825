//! Environment variable access with defaults
//!
//! Each call re-reads the live environment; nothing is cached, so a
//! variable set after startup is visible immediately.

/// Get the value of an environment variable, or `""` if it is unset.
///
/// A variable that is set to the empty string returns `""` as well;
/// only an unset (or non-Unicode) variable falls back.
#[must_use]
pub fn getenv(name: &str) -> String {
    getenv_or(name, "")
}

/// Get the value of an environment variable, or `default` if it is
/// unset or not valid Unicode.
///
/// # Examples
///
/// ```
/// use lumen_system::env::getenv_or;
///
/// assert_eq!(getenv_or("LUMEN_DOC_EXAMPLE_UNSET", "fallback"), "fallback");
/// ```
#[must_use]
pub fn getenv_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_variable_is_returned() {
        // Unique name so parallel tests cannot interfere.
        unsafe { std::env::set_var("LUMEN_SYSTEM_TEST_FOO", "bar") };
        assert_eq!(getenv("LUMEN_SYSTEM_TEST_FOO"), "bar");
        assert_eq!(getenv_or("LUMEN_SYSTEM_TEST_FOO", "x"), "bar");

        unsafe { std::env::remove_var("LUMEN_SYSTEM_TEST_FOO") };
        assert_eq!(getenv_or("LUMEN_SYSTEM_TEST_FOO", "x"), "x");
    }

    #[test]
    fn unset_variable_falls_back() {
        assert_eq!(getenv("LUMEN_SYSTEM_TEST_NEVER_SET"), "");
        assert_eq!(getenv_or("LUMEN_SYSTEM_TEST_NEVER_SET", "default"), "default");
    }

    #[test]
    fn empty_value_is_not_unset() {
        unsafe { std::env::set_var("LUMEN_SYSTEM_TEST_EMPTY", "") };
        assert_eq!(getenv_or("LUMEN_SYSTEM_TEST_EMPTY", "default"), "");
        unsafe { std::env::remove_var("LUMEN_SYSTEM_TEST_EMPTY") };
    }
}
