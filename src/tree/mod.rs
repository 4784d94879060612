//! Hierarchical routing tree.
//!
//! # Data Flow
//! ```text
//! add(key, value)
//!     → node.rs walks key tokens from the root
//!     → missing intermediate nodes created (insert-if-absent)
//!     → terminal node: empty → store value
//!                      populated → observer.rs reports conflict, value dropped
//!
//! find(key)
//!     → node.rs walks key tokens until a token has no child
//!     → return the deepest value seen on the way (or None)
//!
//! traverse(visitor) / snapshot()
//!     → pre-order walk over children copied out of each node
//! ```
//!
//! # Design Decisions
//! - Append-only: nodes and values are never removed or replaced
//! - First writer wins at every node; duplicates are reported, not applied
//! - A miss is `None`, never an error
//! - Safe for concurrent `add`/`find`/`traverse` without external locking;
//!   readers may observe a partially built path and fall back to an ancestor

pub mod node;
pub mod observer;
pub mod snapshot;

pub use node::{AddOutcome, TreeNode};
pub use observer::{ConflictObserver, TracingObserver};
pub use snapshot::TreeSnapshot;

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::routing::RoutingKey;

/// Token tree mapping routing keys to values with ancestor fallback.
pub struct RoutingTree<K, V> {
    root: TreeNode<K, V>,
    observer: Arc<dyn ConflictObserver<K, V>>,
}

impl<K, V> RoutingTree<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    /// Create an empty tree that logs conflicts through `tracing`.
    pub fn new() -> Self {
        Self::from_root(TreeNode::new(0, None, None))
    }

    /// Create a tree whose root carries `token` for identification.
    pub fn with_root_token(token: K) -> Self {
        Self::from_root(TreeNode::new(0, Some(token), None))
    }

    /// Create a tree whose root holds `value`, returned for every key with no
    /// more specific match.
    pub fn with_default(value: V) -> Self {
        Self::from_root(TreeNode::new(0, None, Some(value)))
    }

    pub fn with_root(token: Option<K>, value: Option<V>) -> Self {
        Self::from_root(TreeNode::new(0, token, value))
    }

    fn from_root(root: TreeNode<K, V>) -> Self {
        Self {
            root,
            observer: Arc::new(TracingObserver),
        }
    }
}

impl<K, V> Default for RoutingTree<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RoutingTree<K, V>
where
    K: Eq + Hash,
{
    /// Replace the conflict observer.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: ConflictObserver<K, V> + 'static,
    {
        self.observer = Arc::new(observer);
        self
    }

    pub fn root(&self) -> &TreeNode<K, V> {
        &self.root
    }

    /// Pre-order walk calling `visitor` once per stored value.
    ///
    /// Nodes added while the walk is in progress may or may not be visited.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&V),
    {
        self.root.traverse(&mut visitor);
    }

    /// Number of nodes holding a value.
    pub fn value_count(&self) -> usize {
        let mut count = 0;
        self.traverse(|_| count += 1);
        count
    }

    pub fn snapshot(&self) -> TreeSnapshot<K, V>
    where
        K: Ord + Clone,
        V: Clone,
    {
        self.root.snapshot()
    }
}

impl<K, V> RoutingTree<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Store `value` at `key` unless a value is already there.
    pub fn add(&self, key: &RoutingKey<K>, value: V) -> AddOutcome {
        self.add_tokens(key.tokens(), value)
    }

    /// Store `value` at the path spelled by `tokens`.
    ///
    /// # Panics
    /// If `tokens` is empty.
    pub fn add_tokens(&self, tokens: &[K], value: V) -> AddOutcome {
        assert!(!tokens.is_empty(), "cannot add a value at an empty routing key");
        self.root.add_tokens(tokens, value, self.observer.as_ref())
    }
}

impl<K, V> RoutingTree<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Value at `key`, or at its deepest populated ancestor.
    pub fn find(&self, key: &RoutingKey<K>) -> Option<V> {
        self.find_tokens(key.tokens())
    }

    pub fn find_tokens(&self, tokens: &[K]) -> Option<V> {
        self.root.find_tokens(tokens)
    }
}

impl<K, V> fmt::Debug for RoutingTree<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTree")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
