//! Error types raised by payload operations.

use std::io;

use thiserror::Error;

/// Errors raised while producing or pushing payload content.
///
/// Metadata accessors never fail; only stream-producing operations and
/// fallible constructors return this type.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Raised when a stream is requested after [`crate::Payload::release`].
    #[error("payload content has been released")]
    Released,
    /// Raised when a non-repeatable payload is asked for a second stream.
    #[error("payload content is not repeatable and has already been consumed")]
    AlreadyConsumed,
    /// Fault reported by the underlying content source or sink. The original
    /// error is kept intact and exposed through `source()`.
    #[error("payload I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Raised when a required construction argument is absent or empty.
    #[error("missing required payload argument: {0}")]
    Precondition(String),
}

impl PayloadError {
    /// Returns the underlying I/O error when this is an [`PayloadError::Io`].
    #[must_use]
    pub const fn as_io(&self) -> Option<&io::Error> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}
