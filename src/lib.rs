//! Hierarchical message router.
//!
//! Maps delimited routing keys (`svc.payments.v2`) to targets. A target
//! registered on a short prefix applies to every longer key beneath it unless
//! a more specific route overrides it.
//!
//! ```rust
//! use hierarchical_router::Router;
//!
//! let router = Router::new();
//! router.register("svc.payments", "H1").unwrap();
//! router.register("svc.payments.v2", "H2").unwrap();
//!
//! assert_eq!(router.resolve("svc.payments.v2.beta").unwrap(), Some("H2"));
//! assert_eq!(router.resolve("svc.billing").unwrap(), None);
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod routing;
pub mod tree;

pub use config::schema::RouterConfig;
pub use error::KeyError;
pub use routing::{RoutingKey, Router};
pub use tree::{AddOutcome, ConflictObserver, RoutingTree, TreeNode, TreeSnapshot};
