//! Error types shared across subsystems.
//!
//! Duplicate registrations and lookup misses are not errors: the tree reports
//! the former through its observer and the latter as `None`.

use thiserror::Error;

/// Errors raised while building a [`RoutingKey`](crate::routing::RoutingKey).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No tokens at all.
    #[error("routing key must contain at least one token")]
    Empty,

    /// A delimiter of zero length cannot split anything.
    #[error("routing key delimiter must not be empty")]
    EmptyDelimiter,

    /// Two delimiters back to back, or one at either end.
    #[error("routing key segment {position} is empty")]
    EmptySegment { position: usize },
}
