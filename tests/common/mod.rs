//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use hierarchical_router::{ConflictObserver, RoutingKey};

/// A rejected write as seen by the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<V> {
    pub key: Vec<String>,
    pub existing: V,
    pub rejected: V,
}

/// Observer that keeps every conflict it sees.
#[derive(Clone)]
pub struct RecordingObserver<V> {
    events: Arc<Mutex<Vec<Conflict<V>>>>,
}

impl<V> Default for RecordingObserver<V> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<V: Clone> RecordingObserver<V> {
    pub fn events(&self) -> Vec<Conflict<V>> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl<V> ConflictObserver<String, V> for RecordingObserver<V>
where
    V: Clone + Send,
{
    fn on_conflict(&self, key: &[String], existing: &V, rejected: &V) {
        self.events.lock().unwrap().push(Conflict {
            key: key.to_vec(),
            existing: existing.clone(),
            rejected: rejected.clone(),
        });
    }
}

/// Parse a dot-delimited key.
#[allow(dead_code)]
pub fn key(raw: &str) -> RoutingKey<String> {
    raw.parse().unwrap()
}
