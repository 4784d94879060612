//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tree / routing / config produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr (text or JSON lines)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Duplicate registrations are logged at error level and counted
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
