//! Configuration schema definitions.
//!
//! This module defines the route table file format.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::DEFAULT_DELIMITER;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Token delimiter for route keys (e.g., "." in "svc.payments").
    pub delimiter: String,

    /// Target for keys no route covers. Stored at the tree root.
    pub default_target: Option<String>,

    /// Route definitions mapping keys to targets.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            default_target: None,
            routes: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A single route: every key starting with `key` goes to `target` unless a
/// longer route matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Delimited routing key prefix.
    pub key: String,

    /// Destination identifier.
    pub target: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.delimiter, ".");
        assert!(config.default_target.is_none());
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json);
    }

    #[test]
    fn test_minimal_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            key = "svc.payments"
            target = "payments-actor"
            "#,
        )
        .unwrap();

        assert_eq!(config.delimiter, ".");
        assert_eq!(
            config.routes,
            vec![RouteConfig {
                key: "svc.payments".into(),
                target: "payments-actor".into(),
            }]
        );
    }

    #[test]
    fn test_full_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            delimiter = "/"
            default_target = "dead-letter"

            [observability]
            log_level = "debug"
            json = true

            [[routes]]
            key = "orders"
            target = "orders-actor"

            [[routes]]
            key = "orders/refunds"
            target = "refunds-actor"
            "#,
        )
        .unwrap();

        assert_eq!(config.delimiter, "/");
        assert_eq!(config.default_target.as_deref(), Some("dead-letter"));
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.json);
    }
}
