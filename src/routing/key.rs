//! Tokenized routing keys.
//!
//! # Responsibilities
//! - Guarantee a key has at least one token
//! - Split delimited strings (`svc.payments.v2`) into tokens
//! - Reject empty segments so `a..b` never silently matches `a.b`

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// A non-empty, ordered sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingKey<K> {
    tokens: Vec<K>,
}

impl<K> RoutingKey<K> {
    /// Build a key from already tokenized segments.
    pub fn new(tokens: Vec<K>) -> Result<Self, KeyError> {
        if tokens.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[K] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<K> {
        self.tokens
    }
}

impl RoutingKey<String> {
    /// Split `raw` on `delimiter`.
    pub fn parse(raw: &str, delimiter: &str) -> Result<Self, KeyError> {
        if delimiter.is_empty() {
            return Err(KeyError::EmptyDelimiter);
        }
        if raw.is_empty() {
            return Err(KeyError::Empty);
        }

        let tokens = raw
            .split(delimiter)
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    Err(KeyError::EmptySegment { position })
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }
}

impl FromStr for RoutingKey<String> {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_DELIMITER)
    }
}

impl<K> TryFrom<Vec<K>> for RoutingKey<K> {
    type Error = KeyError;

    fn try_from(tokens: Vec<K>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl<K: fmt::Display> fmt::Display for RoutingKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(DEFAULT_DELIMITER)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
