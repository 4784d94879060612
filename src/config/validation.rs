//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route key parses with the configured delimiter
//! - Reject empty targets
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Duplicate keys are left to the tree, which keeps the first and reports the rest

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::error::KeyError;
use crate::routing::RoutingKey;

/// A single semantic problem in a [`RouterConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("default_target must not be empty")]
    EmptyDefaultTarget,

    #[error("route #{index} has invalid key {key:?}: {source}")]
    InvalidKey {
        index: usize,
        key: String,
        #[source]
        source: KeyError,
    },

    #[error("route #{index} ({key}) has an empty target")]
    EmptyTarget { index: usize, key: String },
}

/// Check `config` for problems serde cannot catch.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let delimiter_ok = !config.delimiter.is_empty();
    if !delimiter_ok {
        errors.push(ValidationError::EmptyDelimiter);
    }

    if config.default_target.as_deref() == Some("") {
        errors.push(ValidationError::EmptyDefaultTarget);
    }

    for (index, route) in config.routes.iter().enumerate() {
        // Every key would fail on an empty delimiter; that is reported once above.
        if delimiter_ok {
            if let Err(source) = RoutingKey::parse(&route.key, &config.delimiter) {
                errors.push(ValidationError::InvalidKey {
                    index,
                    key: route.key.clone(),
                    source,
                });
            }
        }
        if route.target.is_empty() {
            errors.push(ValidationError::EmptyTarget {
                index,
                key: route.key.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
