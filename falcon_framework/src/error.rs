//! Error types for the Falcon framework
//!
//! GPU command recording and resource creation never fail locally; the host
//! backend reports its own failures through the asynchronous `fail` channel.
//! These errors cover everything else: lifecycle misuse, configuration,
//! start-up arguments, fetch results and host start-up.

use std::fmt;

/// Result type for Falcon framework operations
pub type Result<T> = std::result::Result<T, Error>;

/// Falcon framework errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A lifecycle callback was invoked in a state that does not accept it
    InvalidState(String),

    /// The application configuration is not usable
    InvalidConfig(String),

    /// A start-up argument could not be parsed
    InvalidArgument(String),

    /// An async fetch request could not be completed
    Fetch(String),

    /// Initialization failed (host platform, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR entry (with file:line) and evaluate to the matching [`Error`]
///
/// # Example
///
/// ```ignore
/// let err = falcon_err!(InvalidState, "falcon::Application", "frame_cb before init_cb");
/// ```
#[macro_export]
macro_rules! falcon_err {
    ($kind:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::error::Error::$kind(message)
    }};
}

/// Log an ERROR entry and return early with the matching [`Error`]
#[macro_export]
macro_rules! falcon_bail {
    ($kind:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::falcon_err!($kind, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
