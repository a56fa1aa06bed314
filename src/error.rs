//! Error types.
//!
//! None of these ever reach the user: callers log them and degrade
//! (driver errors mean "unavailable this tick", config errors mean
//! "use defaults for this session").

use std::io;

use thiserror::Error;

/// Failure of a presentation driver, window lookup or key simulation call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// No PowerPoint/WPS automation server could be reached.
    #[error("no presentation application is running")]
    NotRunning,

    /// The application is running but no slideshow is active.
    #[error("no slideshow is active")]
    NoSlideShow,

    /// The slideshow window could not be located.
    #[error("no slideshow window found")]
    WindowNotFound,

    /// An individual automation call failed.
    #[error("`{op}` failed: {reason}")]
    Call { op: &'static str, reason: String },

    /// The back end has no way to perform this command.
    #[error("`{0}` is not supported by this back end")]
    Unsupported(&'static str),
}

impl DriverError {
    pub fn call(op: &'static str, reason: impl ToString) -> Self {
        DriverError::Call {
            op,
            reason: reason.to_string(),
        }
    }
}

/// Result of any call into an external collaborator.
pub type DriverResult<T> = Result<T, DriverError>;

/// Failure reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o: {0}")]
    Io(#[from] io::Error),

    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A registry value could not be read or written.
    #[error("registry: {0}")]
    Registry(String),
}

/// Failure populating the slide thumbnail cache.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("thumbnail cache i/o: {0}")]
    Io(#[from] io::Error),

    #[error("slide export failed: {0}")]
    Export(#[from] DriverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_error_names_operation() {
        let err = DriverError::call("View.Next", "RPC server unavailable");
        assert_eq!(err.to_string(), "`View.Next` failed: RPC server unavailable");
    }
}
