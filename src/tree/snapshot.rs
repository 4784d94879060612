//! Serializable point-in-time copy of a routing tree.
//!
//! Empty fields are left out of the serialized form, so a JSON dump only
//! shows populated values and non-leaf branches:
//!
//! ```text
//! {"children":{"svc":{"children":{"payments":{"value":"H1"}}}}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Owned copy of a node and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Ord, V: Serialize",
    deserialize = "K: Deserialize<'de> + Ord, V: Deserialize<'de>"
))]
pub struct TreeSnapshot<K, V> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<V>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<K, TreeSnapshot<K, V>>,
}

impl<K, V> TreeSnapshot<K, V> {
    /// Number of populated nodes in this subtree.
    pub fn value_count(&self) -> usize {
        usize::from(self.value.is_some())
            + self
                .children
                .values()
                .map(TreeSnapshot::value_count)
                .sum::<usize>()
    }
}
