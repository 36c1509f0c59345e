//! Error kinds for fitviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell bad input apart from a failing
/// environment (missing files, a missing Graphviz installation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration or command-line options
    ConfigInvalid,

    // =========================================================================
    // Input errors
    // =========================================================================
    /// An encoded node identifier violates the identifier grammar
    ParseFailed,

    /// The raw search tree does not have the expected shape
    InvalidFormat,

    /// The input document could not be deserialized
    DeserializationFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// The external drawing service failed to produce a file
    RenderFailed,

    /// Invariant violation
    InvariantViolation,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether the error was caused by the input document rather than the
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::ParseFailed | ErrorKind::InvalidFormat | ErrorKind::DeserializationFailed
        )
    }
}
