//! String-keyed router on top of [`RoutingTree`].
//!
//! # Responsibilities
//! - Parse raw delimited keys into [`RoutingKey`]s
//! - Register targets, reporting duplicates without failing
//! - Resolve keys to the most specific registered target
//! - Build a router from a validated [`RouterConfig`]
//!
//! # Design Decisions
//! - Shared by reference: every operation takes `&self`
//! - Malformed keys are the only error; a miss is `Ok(None)`
//! - The configured default target becomes the root value, so it only answers
//!   keys that nothing more specific covers

use std::fmt;

use crate::config::loader::ConfigError;
use crate::config::schema::{RouteConfig, RouterConfig};
use crate::config::validation::validate_config;
use crate::error::KeyError;
use crate::observability::metrics;
use crate::routing::key::{RoutingKey, DEFAULT_DELIMITER};
use crate::tree::{AddOutcome, RoutingTree, TreeSnapshot};

/// Outcome of registering a batch of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Routes stored in the tree.
    pub inserted: usize,
    /// Raw keys whose target was discarded because the key was already taken.
    pub conflicts: Vec<String>,
}

impl RegistrationReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Routes delimited string keys to values of type `V`.
pub struct Router<V> {
    delimiter: String,
    tree: RoutingTree<String, V>,
}

impl<V> Router<V>
where
    V: Clone + fmt::Debug,
{
    /// Create an empty router splitting keys on `.`.
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            tree: RoutingTree::new(),
        }
    }

    /// Create a router around an existing tree.
    pub fn with_tree(
        delimiter: impl Into<String>,
        tree: RoutingTree<String, V>,
    ) -> Result<Self, KeyError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(KeyError::EmptyDelimiter);
        }
        Ok(Self { delimiter, tree })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn tree(&self) -> &RoutingTree<String, V> {
        &self.tree
    }

    pub fn parse_key(&self, raw: &str) -> Result<RoutingKey<String>, KeyError> {
        RoutingKey::parse(raw, &self.delimiter)
    }

    /// Register `value` under `raw`.
    ///
    /// A key that already holds a value keeps it; the outcome is
    /// [`AddOutcome::Conflict`] and the tree's observer is notified.
    pub fn register(&self, raw: &str, value: V) -> Result<AddOutcome, KeyError> {
        let key = self.parse_key(raw)?;
        let outcome = self.tree.add(&key, value);
        metrics::record_registration(outcome.as_label());
        Ok(outcome)
    }

    /// Resolve `raw` to the target of its deepest registered prefix.
    pub fn resolve(&self, raw: &str) -> Result<Option<V>, KeyError> {
        let key = self.parse_key(raw)?;
        let target = self.tree.find(&key);
        metrics::record_lookup(if target.is_some() { "hit" } else { "miss" });
        Ok(target)
    }

    /// Register every route, building each value with `factory`.
    ///
    /// All keys are parsed before anything is stored, so an error means no
    /// route from the batch reached the tree.
    pub fn register_all<F>(
        &self,
        routes: &[RouteConfig],
        mut factory: F,
    ) -> Result<RegistrationReport, KeyError>
    where
        F: FnMut(Option<&RoutingKey<String>>, &str, &str) -> V,
    {
        let keys = routes
            .iter()
            .map(|route| self.parse_key(&route.key))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = RegistrationReport::default();
        for (route, key) in routes.iter().zip(&keys) {
            let value = factory(Some(key), &route.key, &route.target);
            let outcome = self.tree.add(key, value);
            metrics::record_registration(outcome.as_label());
            match outcome {
                AddOutcome::Inserted => report.inserted += 1,
                AddOutcome::Conflict => report.conflicts.push(route.key.clone()),
            }
        }
        Ok(report)
    }

    /// Build a router from `config`, turning each configured target into a
    /// value with `factory`.
    ///
    /// `factory` receives the parsed key, the raw configured key and the
    /// target string of each route. For the default target the parsed key is
    /// `None` and the raw key is empty.
    pub fn from_config_with<F>(
        config: &RouterConfig,
        mut factory: F,
    ) -> Result<(Self, RegistrationReport), ConfigError>
    where
        F: FnMut(Option<&RoutingKey<String>>, &str, &str) -> V,
    {
        validate_config(config).map_err(ConfigError::Validation)?;

        let default = config
            .default_target
            .as_deref()
            .map(|target| factory(None, "", target));
        let router = Self::with_tree(
            config.delimiter.clone(),
            RoutingTree::with_root(None, default),
        )?;

        let report = router.register_all(&config.routes, factory)?;
        tracing::info!(
            routes = config.routes.len(),
            inserted = report.inserted,
            conflicts = report.conflicts.len(),
            delimiter = %router.delimiter,
            "Routes registered"
        );
        Ok((router, report))
    }

    pub fn traverse<F>(&self, visitor: F)
    where
        F: FnMut(&V),
    {
        self.tree.traverse(visitor);
    }

    pub fn snapshot(&self) -> TreeSnapshot<String, V> {
        self.tree.snapshot()
    }
}

impl Router<String> {
    /// Build a router whose values are the configured target strings.
    pub fn from_config(config: &RouterConfig) -> Result<(Self, RegistrationReport), ConfigError> {
        Self::from_config_with(config, |_, _, target| target.to_string())
    }
}

impl<V> Default for Router<V>
where
    V: Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("delimiter", &self.delimiter)
            .field("tree", &self.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(key: &str, target: &str) -> RouteConfig {
        RouteConfig {
            key: key.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let router = Router::new();
        assert_eq!(router.register("svc.payments", "H1").unwrap(), AddOutcome::Inserted);
        assert_eq!(router.register("svc.payments.v2", "H2").unwrap(), AddOutcome::Inserted);

        assert_eq!(router.resolve("svc.payments").unwrap(), Some("H1"));
        assert_eq!(router.resolve("svc.payments.v2.beta").unwrap(), Some("H2"));
        assert_eq!(router.resolve("svc.billing").unwrap(), None);
    }

    #[test]
    fn test_duplicate_registration_is_not_an_error() {
        let router = Router::new();
        router.register("a.b", 1).unwrap();
        assert_eq!(router.register("a.b", 2).unwrap(), AddOutcome::Conflict);
        assert_eq!(router.resolve("a.b").unwrap(), Some(1));
    }

    #[test]
    fn test_malformed_keys_rejected() {
        let router: Router<u32> = Router::new();
        assert_eq!(router.register("", 1), Err(KeyError::Empty));
        assert_eq!(
            router.resolve("a..b"),
            Err(KeyError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let router = Router::with_tree("/", RoutingTree::new()).unwrap();
        router.register("orders/created", "created-handler").unwrap();
        assert_eq!(
            router.resolve("orders/created/eu").unwrap(),
            Some("created-handler")
        );
        assert_eq!(router.resolve("orders.created").unwrap(), None);

        let empty: Result<Router<u32>, _> = Router::with_tree("", RoutingTree::new());
        assert_eq!(empty.unwrap_err(), KeyError::EmptyDelimiter);
    }

    #[test]
    fn test_from_config_with_default_target() {
        let config = RouterConfig {
            default_target: Some("dead-letter".into()),
            routes: vec![
                route("orders", "orders-actor"),
                route("orders.refunds", "refunds-actor"),
                route("orders", "duplicate-actor"),
            ],
            ..RouterConfig::default()
        };

        let (router, report) = Router::from_config(&config).unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.conflicts, vec!["orders".to_string()]);
        assert!(report.has_conflicts());

        assert_eq!(router.resolve("orders.new").unwrap().as_deref(), Some("orders-actor"));
        assert_eq!(
            router.resolve("orders.refunds.partial").unwrap().as_deref(),
            Some("refunds-actor")
        );
        assert_eq!(router.resolve("billing").unwrap().as_deref(), Some("dead-letter"));
    }

    #[test]
    fn test_factory_sees_parsed_keys() {
        let config = RouterConfig {
            delimiter: ":".into(),
            default_target: Some("root".into()),
            routes: vec![route("a:b", "ab")],
            ..RouterConfig::default()
        };

        let (router, _) = Router::from_config_with(&config, |key, raw, target| {
            let depth = key.map(|k| k.tokens().len()).unwrap_or(0);
            format!("{target}@{depth}[{raw}]")
        })
        .unwrap();

        assert_eq!(router.resolve("a:b").unwrap().as_deref(), Some("ab@2[a:b]"));
        assert_eq!(router.resolve("z").unwrap().as_deref(), Some("root@0[]"));
    }

    #[test]
    fn test_register_all_rejects_whole_batch_on_bad_key() {
        let router = Router::new();
        let routes = vec![route("a", "x"), route("a", "dup"), route("b..c", "y")];

        let result = router.register_all(&routes, |_, _, target| target.to_string());
        assert_eq!(result, Err(KeyError::EmptySegment { position: 1 }));
        assert_eq!(router.resolve("a").unwrap(), None);
        assert_eq!(router.tree().value_count(), 0);

        let report = router
            .register_all(&routes[..2], |_, _, target| target.to_string())
            .unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.conflicts, vec!["a".to_string()]);
        assert_eq!(router.resolve("a").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = RouterConfig {
            routes: vec![route("a..b", "x")],
            ..RouterConfig::default()
        };
        let err = Router::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_snapshot_and_traverse() {
        let router = Router::new();
        router.register("a", 1).unwrap();
        router.register("a.b", 2).unwrap();

        let mut total = 0;
        router.traverse(|v| total += v);
        assert_eq!(total, 3);
        assert_eq!(router.snapshot().value_count(), 2);
    }
}
