//! Metrics collection.
//!
//! # Metrics
//! - `router_registrations_total` (counter): route registrations by outcome
//!   (`inserted`, `conflict`)
//! - `router_lookups_total` (counter): resolutions by result (`hit`, `miss`)
//! - `tree_conflicts_total` (counter): writes rejected by a populated node
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder the
//!   calls are no-ops
//! - Low-overhead metric updates (atomic operations)

/// Record a route registration.
pub fn record_registration(outcome: &'static str) {
    ::metrics::counter!("router_registrations_total", "outcome" => outcome).increment(1);
}

/// Record a key resolution.
pub fn record_lookup(result: &'static str) {
    ::metrics::counter!("router_lookups_total", "result" => result).increment(1);
}

/// Record a rejected overwrite.
pub fn record_conflict() {
    ::metrics::counter!("tree_conflicts_total").increment(1);
}
