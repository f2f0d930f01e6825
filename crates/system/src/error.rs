//! Error types for system operations
//!
//! Public probe APIs communicate "capability absent" through sentinel
//! return values rather than errors. `SystemError` exists for the
//! fallible internals (daemonizing, crash-hook installation) and for
//! callers that want the underlying OS failure instead of a sentinel.

use thiserror::Error;

/// Main error type for system operations
#[derive(Error, Debug)]
pub enum SystemError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Platform-specific error
    #[error("Platform error: {message}")]
    PlatformError {
        /// Error message
        message: String,
        /// OS error code if available
        code: Option<i32>,
    },

    /// Feature not supported on this platform or build
    #[error("Not supported on this platform: {0}")]
    NotSupported(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for system operations
pub type SystemResult<T> = std::result::Result<T, SystemError>;

impl SystemError {
    /// Create a platform error from the most recent OS error
    pub fn last_os_error(context: impl Into<String>) -> Self {
        let err = std::io::Error::last_os_error();
        Self::PlatformError {
            message: format!("{}: {err}", context.into()),
            code: err.raw_os_error(),
        }
    }

    /// Create a feature-not-supported error
    pub fn not_supported(feature: impl Into<String>) -> Self {
        Self::NotSupported(feature.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_keeps_os_code() {
        let err = SystemError::PlatformError { message: "ioctl failed".into(), code: Some(25) };
        assert_eq!(err.to_string(), "Platform error: ioctl failed");

        let SystemError::PlatformError { code, .. } = err else {
            panic!("expected PlatformError");
        };
        assert_eq!(code, Some(25));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: SystemError = io.into();
        assert!(err.to_string().starts_with("I/O error:"));
    }
}
