//! Crate-wide error taxonomy.
//!
//! Everything that can go wrong while building a logger is enumerated here.
//! Emission itself is infallible by design: once a handle exists there is no
//! channel left to report the logger's own failures through.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Errors produced while building a logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// A level name did not match the registry (case-insensitively).
    #[error("unknown log level {0:?}")]
    UnknownLevel(String),

    /// A sink identifier used a scheme the writer does not speak.
    ///
    /// Only `stdout`, `stderr`, plain file paths and `file://` URLs are
    /// accepted.
    #[error("unsupported sink {0:?}")]
    UnsupportedSink(String),

    /// A file sink could not be opened. The io cause passes through
    /// unmodified.
    #[error("cannot open sink {path:?}: {source}")]
    Sink {
        path: String,
        #[source]
        source: io::Error,
    },
}
