//! Error type shared by the construction and conversion functions

use thiserror::Error;

/// Errors returned by fallible `uuid0` operations.
///
/// Every error is raised at the point of construction or conversion; a failed parse never yields
/// a partially built [`Uuid0`](crate::Uuid0).
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// Wrong number or combination of construction inputs.
    #[error("invalid argument: {0}")]
    Argument(&'static str),

    /// Malformed hex, byte, field or base62 input.
    #[error("invalid representation: {0}")]
    Format(String),

    /// Timestamp outside the range the target conversion can represent.
    #[error("out of range: {0}")]
    Range(String),
}

impl Error {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub(crate) fn range(message: impl Into<String>) -> Self {
        Self::Range(message.into())
    }
}
