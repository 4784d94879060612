//! A single node of the routing tree.
//!
//! # Responsibilities
//! - Own the child nodes reachable through each next token
//! - Hold the (at most once populated) value stored at this path
//! - Walk a token path for insertion, lookup and traversal
//!
//! # Design Decisions
//! - Children live in a `DashMap`, so creation of a missing child is a single
//!   atomic insert-if-absent on the owning shard
//! - Children are `Arc`-shared so a walk never holds a shard guard while it
//!   descends or calls back into user code
//! - The value is a `OnceLock`: the first writer wins and every later writer
//!   gets its value handed back

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::tree::observer::ConflictObserver;
use crate::tree::snapshot::TreeSnapshot;

/// Result of storing a value at a routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The terminal node was empty and now holds the value.
    Inserted,
    /// The terminal node already held a value; the new one was discarded.
    Conflict,
}

impl AddOutcome {
    pub fn is_conflict(self) -> bool {
        matches!(self, AddOutcome::Conflict)
    }

    pub(crate) fn as_label(self) -> &'static str {
        match self {
            AddOutcome::Inserted => "inserted",
            AddOutcome::Conflict => "conflict",
        }
    }
}

/// A node in the routing tree.
pub struct TreeNode<K, V> {
    /// Distance from the root; the root is at depth 0.
    depth: usize,
    /// Token that leads to this node from its parent (`None` for a bare root).
    token: Option<K>,
    value: OnceLock<V>,
    children: DashMap<K, Arc<TreeNode<K, V>>>,
}

impl<K, V> TreeNode<K, V> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn token(&self) -> Option<&K> {
        self.token.as_ref()
    }

    /// The value stored at this node, if any.
    pub fn value(&self) -> Option<&V> {
        self.value.get()
    }
}

impl<K, V> TreeNode<K, V>
where
    K: Eq + Hash,
{
    pub(crate) fn new(depth: usize, token: Option<K>, value: Option<V>) -> Self {
        Self {
            depth,
            token,
            value: value.map(OnceLock::from).unwrap_or_default(),
            children: DashMap::new(),
        }
    }

    /// Get the child reached through `token`.
    pub fn child(&self, token: &K) -> Option<Arc<TreeNode<K, V>>> {
        self.children.get(token).map(|child| Arc::clone(child.value()))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Copy out the current children so no shard lock is held while walking them.
    fn children_snapshot(&self) -> Vec<Arc<TreeNode<K, V>>> {
        self.children
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Pre-order walk calling `visitor` on every stored value.
    pub(crate) fn traverse<F>(&self, visitor: &mut F)
    where
        F: FnMut(&V),
    {
        if let Some(value) = self.value() {
            visitor(value);
        }
        for child in self.children_snapshot() {
            child.traverse(visitor);
        }
    }

    pub(crate) fn snapshot(&self) -> TreeSnapshot<K, V>
    where
        K: Ord + Clone,
        V: Clone,
    {
        let children: BTreeMap<K, TreeSnapshot<K, V>> = self
            .children
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|(token, child)| (token, child.snapshot()))
            .collect();

        TreeSnapshot {
            value: self.value().cloned(),
            children,
        }
    }
}

impl<K, V> TreeNode<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Store `value` at the node addressed by `tokens`, creating any missing
    /// nodes on the way.
    ///
    /// A populated terminal node is never overwritten: the rejected value is
    /// reported to `observer` and [`AddOutcome::Conflict`] is returned.
    ///
    /// # Panics
    /// If `tokens` has no segment at this node's depth.
    pub(crate) fn add_tokens(
        &self,
        tokens: &[K],
        value: V,
        observer: &dyn ConflictObserver<K, V>,
    ) -> AddOutcome {
        assert!(
            tokens.len() > self.depth,
            "routing key of {} tokens has no segment at depth {}",
            tokens.len(),
            self.depth
        );
        let token = &tokens[self.depth];

        tracing::debug!(
            depth = self.depth,
            node = ?self.token,
            token = ?token,
            tokens = ?tokens,
            "Adding route segment"
        );

        if tokens.len() > self.depth + 1 {
            let child = self.child_or_insert(token);
            return child.add_tokens(tokens, value, observer);
        }

        let existing = match self.children.entry(token.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(TreeNode::new(
                    self.depth + 1,
                    Some(token.clone()),
                    Some(value),
                )));
                return AddOutcome::Inserted;
            }
            Entry::Occupied(slot) => Arc::clone(slot.get()),
        };

        match existing.value.set(value) {
            Ok(()) => AddOutcome::Inserted,
            Err(rejected) => {
                // set() only fails once a value is present
                if let Some(current) = existing.value() {
                    observer.on_conflict(tokens, current, &rejected);
                }
                AddOutcome::Conflict
            }
        }
    }

    fn child_or_insert(&self, token: &K) -> Arc<TreeNode<K, V>> {
        if let Some(child) = self.child(token) {
            return child;
        }
        let depth = self.depth + 1;
        Arc::clone(
            self.children
                .entry(token.clone())
                .or_insert_with(|| Arc::new(TreeNode::new(depth, Some(token.clone()), None)))
                .value(),
        )
    }
}

impl<K, V> TreeNode<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Value at the deepest node along `tokens` that holds one.
    ///
    /// Walking stops at the first token with no child; the nearest populated
    /// ancestor then answers. `None` means nothing on the path holds a value.
    ///
    /// # Panics
    /// If this node sits deeper than `tokens` is long.
    pub(crate) fn find_tokens(&self, tokens: &[K]) -> Option<V> {
        let mut deepest: Option<Arc<TreeNode<K, V>>> = None;
        let mut cursor: Option<Arc<TreeNode<K, V>>> = None;

        for token in &tokens[self.depth..] {
            let next = match cursor.as_deref() {
                Some(node) => node.child(token),
                None => self.child(token),
            };
            let Some(next) = next else {
                break;
            };
            if next.value().is_some() {
                deepest = Some(Arc::clone(&next));
            }
            cursor = Some(next);
        }

        match deepest {
            Some(node) => node.value().cloned(),
            None => self.value().cloned(),
        }
    }
}

impl<K, V> fmt::Debug for TreeNode<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("depth", &self.depth)
            .field("token", &self.token)
            .field("value", &self.value.get())
            .field("children", &self.children.len())
            .finish()
    }
}
