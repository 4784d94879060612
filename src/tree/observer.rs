//! Conflict reporting for duplicate registrations.
//!
//! A rejected write is not an error for the caller; it is handed to a
//! [`ConflictObserver`] so registration bugs stay visible without aborting.

use std::fmt;

use crate::observability::metrics;

/// Receives every write rejected because the target node already holds a value.
pub trait ConflictObserver<K, V>: Send + Sync {
    /// `key` is the full token path of the rejected write.
    fn on_conflict(&self, key: &[K], existing: &V, rejected: &V);
}

/// Logs conflicts at `error` level and counts them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<K, V> ConflictObserver<K, V> for TracingObserver
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn on_conflict(&self, key: &[K], existing: &V, rejected: &V) {
        tracing::error!(
            key = ?key,
            existing = ?existing,
            rejected = ?rejected,
            "Request to overwrite existing value rejected"
        );
        metrics::record_conflict();
    }
}

impl<K, V, F> ConflictObserver<K, V> for F
where
    F: Fn(&[K], &V, &V) + Send + Sync,
{
    fn on_conflict(&self, key: &[K], existing: &V, rejected: &V) {
        self(key, existing, rejected)
    }
}
