//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw key ("svc.payments.v2")
//!     → key.rs (split on delimiter, validate segments)
//!     → router.rs (register / resolve)
//!     → tree (longest populated prefix wins)
//!     → Return: Some(target) or None
//!
//! Route registration (at startup):
//!     RouterConfig.routes[]
//!     → validate
//!     → factory builds a value per route
//!     → add to tree; duplicates reported, first registration kept
//! ```
//!
//! # Design Decisions
//! - Exact-segment matching only, no wildcards
//! - Deterministic: a key resolves to the deepest registered prefix
//! - Miss is `None`; the caller applies its own "no handler" policy

pub mod key;
pub mod router;

pub use key::{RoutingKey, DEFAULT_DELIMITER};
pub use router::{RegistrationReport, Router};
